//! Init command.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# call-lint configuration
#
# method_name: regular expression matched against the WHOLE method or
#   constructor name. An empty string disables the check.
# argument_count: comma-separated inclusive ranges of argument counts.
#   "0"    exactly zero arguments (a bare number N means exactly N)
#   "2-4"  between 2 and 4
#   "-1"   at most 1
#   "5-"   at least 5
#   Ranges can be combined: "-3, 5-7, 9-". "0-" matches any count.

[analyzer]
root = "."
exclude = ["**/test/**", "**/build/**", "**/generated/**"]

[check]
method_name = "exit"
argument_count = "0-"
severity = "error"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_template(Path::new("call-lint.toml"), force)?;
    println!("Created call-lint.toml");
    Ok(())
}

fn write_template(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    std::fs::write(config_path, CONFIG_TEMPLATE)?;
    Ok(())
}
