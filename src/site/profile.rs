//! Portfolio content shared by the HTML page and the TUI

use serde::{Deserialize, Serialize};

/// Everything the page says about its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    /// Meta description
    pub description: String,
    /// Roles shown under the name, separated by slashes
    pub roles: Vec<String>,
    pub github_user: String,
    pub email: String,
    pub status: String,
    pub stack: Vec<String>,
    pub notes: String,
    /// Comment at the bottom of `profile.json`
    pub hint: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Che-Lun Liang".to_string(),
            description: "Began with Python, now exploring the vast digital ocean.".to_string(),
            roles: vec!["Coding Peasant".to_string(), "Traveler".to_string()],
            github_user: "lianglun0125".to_string(),
            email: "me@chelunliang.com".to_string(),
            status: "Trying new things, and currently learning about Cloudflare.".to_string(),
            stack: vec![
                "Python".to_string(),
                "React".to_string(),
                "Edge Computing".to_string(),
                "Image Processing".to_string(),
                "Software development".to_string(),
            ],
            notes: "Exploring the vast digital ocean.".to_string(),
            hint: "Press '~' or tap my name five times to unlock fun features.".to_string(),
        }
    }
}

impl Profile {
    pub fn github_url(&self) -> String {
        format!("https://github.com/{}", self.github_user)
    }

    /// "Coding Peasant / Traveler"
    pub fn tagline(&self) -> String {
        self.roles.join(" / ")
    }

    /// Plain-text `profile.json` body, one entry per line
    pub fn json_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "{".to_string(),
            format!("  \"Status\": \"{}\",", self.status),
            String::new(),
            "  \"Stack\": [".to_string(),
        ];
        let last = self.stack.len().saturating_sub(1);
        for (i, item) in self.stack.iter().enumerate() {
            let comma = if i == last { "" } else { "," };
            lines.push(format!("    \"{}\"{}", item, comma));
        }
        lines.extend([
            "  ],".to_string(),
            String::new(),
            "  \"Contact\": {".to_string(),
            format!("    \"Email\": \"{}\",", self.email),
            format!("    \"GitHub\": \"@{}\"", self.github_user),
            "  },".to_string(),
            String::new(),
            format!("  \"Notes\": \"{}\"", self.notes),
            String::new(),
            format!("  // {}", self.hint),
            "}".to_string(),
        ]);
        lines
    }
}
