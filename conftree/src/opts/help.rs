//! Plain-text usage rendering for a table of configuration flags.

use super::spec::ConfigActionSpec;

const HELP_INDENT: &str = "      ";
const HELP_WIDTH: usize = 72;

/// Render usage text for `specs`, one block per flag.
///
/// Each block lists the spellings with the value hint, followed by the help
/// text wrapped at a fixed width.
///
/// ```rust
/// use conftree::{ConfigActionSpec, render_help};
///
/// let text = render_help(&[ConfigActionSpec::load_dir("-d", "--dir")]);
/// assert!(text.starts_with("  -d [<targetpath>=]<dirname>, --dir [<targetpath>=]<dirname>\n"));
/// assert!(text.contains("ascending file name order"));
/// ```
#[must_use]
pub fn render_help(specs: &[ConfigActionSpec<'_>]) -> String {
    let mut text = String::new();
    for spec in specs {
        let spellings: Vec<String> = [spec.short_flag, spec.long_flag]
            .into_iter()
            .filter(|flag| !flag.is_empty())
            .map(|flag| {
                if spec.value_hint.is_empty() {
                    flag.to_owned()
                } else {
                    format!("{flag} {}", spec.value_hint)
                }
            })
            .collect();
        text.push_str(&format!("  {}\n", spellings.join(", ")));
        for line in wrap(spec.help) {
            text.push_str(&format!("{HELP_INDENT}{line}\n"));
        }
    }
    text
}

fn wrap(help: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in help.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > HELP_WIDTH {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
