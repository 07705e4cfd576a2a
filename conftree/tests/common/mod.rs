//! Shared fixtures for the integration tests.
//!
//! [`check_opts`] drives the full size-then-fill scanning protocol over an
//! argument vector, checks the compacted arguments and the parsed records,
//! then replays the records onto a copy of a reference tree and compares the
//! outcome with an expected tree.

use anyhow::{Result, anyhow, ensure};
use conftree::{ActionKind, ConfResult, ConfigActionSpec, ParsedOpt, Tree, Workspace, parse_opts};

/// Reference configuration most scenarios start from.
pub const REFTREE: &str = r"
key0:
  key0val0:
    - key0val0val0
    - key0val0val1
    - key0val0val2
  key0val1:
    - key0val1val0
    - key0val1val1
    - key0val1val2
key1:
  key1val0:
    - key1val0val0
    - key1val0val1
    - key1val0val2
  key1val1:
    - key1val1val0
    - key1val1val1
    - key1val1val2
";

/// Convert a crate result into an `anyhow` result.
pub fn conf<T>(result: ConfResult<T>) -> Result<T> {
    result.map_err(|err| anyhow!(err.to_string()))
}

/// Parse YAML, mapping failures into `anyhow`.
pub fn yaml(text: &str) -> Result<Tree> {
    conf(Tree::parse(text))
}

/// Parse [`REFTREE`].
pub fn reftree() -> Result<Tree> {
    yaml(REFTREE)
}

/// Expected shape of one parsed option.
#[derive(Clone, Copy, Debug)]
pub struct Expect<'a> {
    pub kind: ActionKind,
    pub target: &'a str,
    pub payload: &'a str,
}

impl<'a> Expect<'a> {
    pub const fn new(kind: ActionKind, target: &'a str, payload: &'a str) -> Self {
        Self {
            kind,
            target,
            payload,
        }
    }
}

/// One scanning-and-replay scenario.
pub struct Scenario<'a> {
    pub specs: &'a [ConfigActionSpec<'a>],
    pub input: Vec<String>,
    pub filtered: Vec<String>,
    pub expected: &'a [Expect<'a>],
    pub start: Tree,
    pub outcome: Tree,
}

/// Owned argument vector from string slices.
pub fn args<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items.iter().map(|item| item.as_ref().to_owned()).collect()
}

/// Run `scenario` through the size query, an undersized buffer, an exactly
/// sized buffer and the replay.
pub fn check_opts(scenario: Scenario<'_>) -> Result<()> {
    let Scenario {
        specs,
        input,
        filtered,
        expected,
        start,
        outcome,
    } = scenario;

    // Size query: nothing moves.
    let mut argv = input.clone();
    let needed = conf(parse_opts(&mut argv, specs, &mut []))?;
    ensure!(needed == expected.len(), "size query reported {needed}");
    ensure!(argv == input, "size query modified the arguments");

    // Undersized buffer: still nothing moves.
    let mut small = vec![ParsedOpt::default(); expected.len() / 2];
    let reported = conf(parse_opts(&mut argv, specs, &mut small))?;
    ensure!(reported == expected.len(), "undersized call reported {reported}");
    ensure!(argv == input, "undersized buffer modified the arguments");

    // Exact buffer: compaction and records.
    let mut out = vec![ParsedOpt::default(); needed];
    let filled = conf(parse_opts(&mut argv, specs, &mut out))?;
    ensure!(filled == expected.len(), "fill call reported {filled}");
    ensure!(argv == filtered, "compacted to {argv:?}, expected {filtered:?}");
    for (position, (got, want)) in out.iter().zip(expected).enumerate() {
        ensure!(
            got.kind() == want.kind
                && got.target == want.target
                && got.payload == want.payload,
            "record {position}: got {got:?}, expected {want:?}"
        );
    }

    let mut tree = start;
    conf(Workspace::new(&mut tree).apply_opts(&out))?;
    ensure!(
        tree == outcome,
        "tree mismatch:\n got: {}\nwant: {}",
        tree.to_value(tree.root()),
        outcome.to_value(outcome.root())
    );
    Ok(())
}
