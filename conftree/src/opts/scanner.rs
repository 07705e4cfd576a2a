//! Flag recognition and argument compaction.

use std::sync::Arc;

use crate::{ConfError, ConfResult};

use super::spec::{ConfigActionSpec, ParsedOpt, ValueHint};
use super::value::split_target_payload;

/// Outcome of a read-only pass over the arguments.
struct Scan {
    opts: Vec<ParsedOpt>,
    keep: Vec<bool>,
}

fn find_spec<'s, 'a>(
    specs: &'s [ConfigActionSpec<'a>],
    token: &str,
) -> Option<&'s ConfigActionSpec<'a>> {
    specs.iter().find(|spec| spec.matches(token))
}

/// Walk `args` once without touching it, recording hits and which tokens
/// survive compaction.
fn scan<A: AsRef<str>>(args: &[A], specs: &[ConfigActionSpec<'_>]) -> ConfResult<Scan> {
    let mut opts = Vec::new();
    let mut keep = vec![true; args.len()];
    let mut tokens = args.iter().map(<A as AsRef<str>>::as_ref).enumerate().peekable();
    while let Some((at, token)) = tokens.next() {
        let Some(spec) = find_spec(specs, token) else {
            continue;
        };
        if let Some(slot) = keep.get_mut(at) {
            *slot = false;
        }
        // A token naming a recognised flag is never taken as a value.
        let next_is_value = tokens
            .peek()
            .is_some_and(|(_, next)| find_spec(specs, next).is_none());
        let raw = match spec.hint() {
            ValueHint::None => None,
            ValueHint::Optional if !next_is_value => None,
            ValueHint::Mandatory if !next_is_value => {
                return Err(Arc::new(ConfError::MissingValue {
                    flag: token.to_owned(),
                }));
            }
            ValueHint::Optional | ValueHint::Mandatory => tokens.next().map(|(value_at, value)| {
                if let Some(slot) = keep.get_mut(value_at) {
                    *slot = false;
                }
                value
            }),
        };
        let (target, payload) = raw.map_or(("", ""), split_target_payload);
        tracing::trace!(flag = token, path = target, payload, "recognised option");
        opts.push(ParsedOpt {
            action: spec.action,
            target: target.to_owned(),
            payload: payload.to_owned(),
        });
    }
    Ok(Scan { opts, keep })
}

/// Recognise flags from `specs` in `args`, using a caller-sized buffer.
///
/// The return value is always the number of recognised options. When `out`
/// is too small to hold them, neither `args` nor `out` is modified, so a
/// caller can size the buffer with a first call and fill it with a second.
/// Otherwise the first entries of `out` receive the options in argument
/// order and `args` is compacted to the unrecognised tokens, in their
/// original order.
///
/// # Errors
///
/// Returns [`ConfError::MissingValue`] when a flag with a mandatory value is
/// the last token or is followed by another recognised flag. `args` is left
/// untouched in that case.
///
/// # Examples
///
/// ```rust
/// use conftree::{ConfigActionSpec, ParsedOpt, parse_opts};
///
/// const SPECS: &[ConfigActionSpec<'static>] = &[ConfigActionSpec::set_node("-n", "--node")];
///
/// let mut args = vec!["prog", "-n", "a.b=1", "rest"];
/// let needed = parse_opts(&mut args, SPECS, &mut [])?;
/// assert_eq!(needed, 1);
/// assert_eq!(args, ["prog", "-n", "a.b=1", "rest"]);
///
/// let mut out = vec![ParsedOpt::default(); needed];
/// parse_opts(&mut args, SPECS, &mut out)?;
/// assert_eq!(args, ["prog", "rest"]);
/// assert_eq!((out[0].target.as_str(), out[0].payload.as_str()), ("a.b", "1"));
/// # Ok::<_, std::sync::Arc<conftree::ConfError>>(())
/// ```
pub fn parse_opts<A: AsRef<str>>(
    args: &mut Vec<A>,
    specs: &[ConfigActionSpec<'_>],
    out: &mut [ParsedOpt],
) -> ConfResult<usize> {
    let Scan { opts, keep } = scan(args, specs)?;
    let count = opts.len();
    if out.len() < count {
        return Ok(count);
    }
    for (slot, opt) in out.iter_mut().zip(opts) {
        *slot = opt;
    }
    compact(args, keep);
    Ok(count)
}

/// Recognise flags from `specs` in `args` in a single call.
///
/// Equivalent to sizing and filling a buffer with [`parse_opts`].
///
/// # Errors
///
/// Returns [`ConfError::MissingValue`] under the same conditions as
/// [`parse_opts`], leaving `args` untouched.
pub fn parse_opts_vec<A: AsRef<str>>(
    args: &mut Vec<A>,
    specs: &[ConfigActionSpec<'_>],
) -> ConfResult<Vec<ParsedOpt>> {
    let Scan { opts, keep } = scan(args, specs)?;
    compact(args, keep);
    Ok(opts)
}

fn compact<A>(args: &mut Vec<A>, keep: Vec<bool>) {
    let mut keep = keep.into_iter();
    args.retain(|_| keep.next().unwrap_or(true));
}
