use crate::navigation::NavMode;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RcConfig {
    pub rows: usize,
    pub cols: usize,
    pub nav_mode: NavMode,
    pub cell_width: usize,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            nav_mode: NavMode::Horizontal,
            cell_width: 12,
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .wordgridrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.wordgridrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(".wordgridrc");
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(".wordgridrc");
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load and parse the RC file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load_config() -> RcConfig {
        let mut config = RcConfig::default();

        if let Some(rc_path) = Self::get_rc_path() {
            match fs::read_to_string(&rc_path) {
                Ok(content) => {
                    Self::parse_config_content(&content, &mut config);
                }
                Err(_) => {
                    // Silently fall back to defaults
                }
            }
        }

        config
    }

    fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        // Remove inline comments
        let line = if let Some(pos) = line.find('#') {
            &line[..pos]
        } else {
            line
        }
        .trim();

        let Some((key, value)) = line.split_once('=') else {
            warn!("Ignoring malformed config line: '{}'", line);
            return;
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "rows" => {
                if let Ok(rows) = value.parse::<usize>() {
                    if rows > 0 && rows <= 500 {
                        config.rows = rows;
                    }
                }
            }
            "cols" => {
                if let Ok(cols) = value.parse::<usize>() {
                    if cols > 0 && cols <= 200 {
                        config.cols = cols;
                    }
                }
            }
            "navmode" => match value {
                "horizontal" | "→" => config.nav_mode = NavMode::Horizontal,
                "vertical" | "↓" => config.nav_mode = NavMode::Vertical,
                "cycle" | "⟳" => config.nav_mode = NavMode::Cycle,
                other => warn!("Unknown navmode '{}'", other),
            },
            "cellwidth" => {
                if let Ok(width) = value.parse::<usize>() {
                    if (4..=40).contains(&width) {
                        config.cell_width = width;
                    }
                }
            }
            other => warn!("Unknown config key '{}'", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value_config() {
        let mut config = RcConfig::default();
        let content = r#"
            # initial grid shape
            rows=8
            cols = 3
            navmode=cycle
            cellwidth=16
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert_eq!(config.rows, 8);
        assert_eq!(config.cols, 3);
        assert_eq!(config.nav_mode, NavMode::Cycle);
        assert_eq!(config.cell_width, 16);
    }

    #[test]
    fn test_inline_comments_and_bad_lines_are_ignored() {
        let mut config = RcConfig::default();
        let content = "rows=7 # seven\nnot a setting\ncols=bogus\n";

        RcLoader::parse_config_content(content, &mut config);

        assert_eq!(config.rows, 7);
        // Unparseable value leaves the default alone
        assert_eq!(config.cols, RcConfig::default().cols);
    }

    #[test]
    fn test_out_of_range_values_keep_defaults() {
        let mut config = RcConfig::default();
        RcLoader::parse_config_content("rows=0\ncols=100000\ncellwidth=1\n", &mut config);
        assert_eq!(config.rows, RcConfig::default().rows);
        assert_eq!(config.cols, RcConfig::default().cols);
        assert_eq!(config.cell_width, RcConfig::default().cell_width);
    }
}
