//! Flag parsing for the list commands.

use anyhow::{bail, Context};

/// Options accepted by `incidents`, `change-requests`, and `users`.
#[derive(Debug, Default, PartialEq)]
pub struct ListOptions {
    /// Tab to activate before loading, e.g. `resolved` or `active`.
    pub tab: Option<String>,
    /// Search term applied across the entity's text fields.
    pub search: Option<String>,
    /// Zero-based page to navigate to after the first load.
    pub page: Option<i64>,
}

/// Parse `--tab`, `--search`, and `--page` from the arguments following
/// a list command. Unknown flags are rejected rather than ignored.
pub fn parse_list_options(args: &[String]) -> anyhow::Result<ListOptions> {
    let mut options = ListOptions::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--tab" => options.tab = Some(flag_value(&mut iter, "--tab")?),
            "--search" => options.search = Some(flag_value(&mut iter, "--search")?),
            "--page" => {
                options.page = Some(
                    flag_value(&mut iter, "--page")?
                        .parse()
                        .context("--page must be an integer")?,
                );
            }
            other => bail!("unknown option '{other}'"),
        }
    }
    Ok(options)
}

fn flag_value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> anyhow::Result<String> {
    iter.next()
        .cloned()
        .with_context(|| format!("{flag} requires a value"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
