//! Inline YAML overrides routed through `-n`/`--node`.

mod common;

use anyhow::Result;
use common::{Expect, Scenario, args, check_opts, reftree, yaml};
use conftree::{ActionKind, ConfResult, ConfigActionSpec, Tree};
use rstest::rstest;

fn action1(tree: &mut Tree, _arg: &str) -> ConfResult<()> {
    tree.set_path("key0.key0val0[0]", "key0val0val0-action1")
        .map(|_| ())
}

const SPECS: &[ConfigActionSpec<'static>] = &[
    ConfigActionSpec::set_node("-n", "--node"),
    ConfigActionSpec::load_file("-f", "--file"),
    ConfigActionSpec::load_dir("-d", "--dir"),
    ConfigActionSpec::callback(action1, "-a1", "--action1", "", "action 1"),
];

const SET: ActionKind = ActionKind::SetNode;

#[rstest]
fn no_recognised_flags_is_fine() -> Result<()> {
    let input = args(&["-a", "-b", "b0", "-c", "c0", "c1"]);
    check_opts(Scenario {
        specs: SPECS,
        filtered: input.clone(),
        input,
        expected: &[],
        start: reftree()?,
        outcome: reftree()?,
    })
}

#[rstest]
#[case::quotes_in_the_value(&[
    "-a", "-n", "key1.key1val0[1]='here it is'", "-b", "b0",
    "--node", "key1.key1val1=\"now this is a scalar\"", "-c", "c0", "c1",
    "-n", "key1.key1val0[1]='here it is overrided'",
])]
#[case::quotes_in_the_arg(&[
    "-a", "-n", "'key1.key1val0[1]=here it is'", "-b", "b0",
    "--node", "\"key1.key1val1=now this is a scalar\"", "-c", "c0", "c1",
    "-n", "'key1.key1val0[1]=here it is overrided'",
])]
fn scalars_override_in_order(#[case] input: &[&str]) -> Result<()> {
    check_opts(Scenario {
        specs: SPECS,
        input: args(input),
        filtered: args(&["-a", "-b", "b0", "-c", "c0", "c1"]),
        expected: &[
            Expect::new(SET, "key1.key1val0[1]", "here it is"),
            Expect::new(SET, "key1.key1val1", "now this is a scalar"),
            Expect::new(SET, "key1.key1val0[1]", "here it is overrided"),
        ],
        start: reftree()?,
        outcome: yaml(
            r"
key0:
  key0val0: [key0val0val0, key0val0val1, key0val0val2]
  key0val1: [key0val1val0, key0val1val1, key0val1val2]
key1:
  key1val0: [key1val0val0, here it is overrided, key1val0val2]
  key1val1: now this is a scalar
",
        )?,
    })
}

#[rstest]
#[case::quotes_in_the_value(&["-a", "-n", "key1.key1val0[5]='here you go with a new one'", "-b", "b0"])]
#[case::quotes_in_the_arg(&["-a", "-n", "'key1.key1val0[5]=here you go with a new one'", "-b", "b0"])]
fn sequences_grow_to_reach_an_index(#[case] input: &[&str]) -> Result<()> {
    check_opts(Scenario {
        specs: SPECS,
        input: args(input),
        filtered: args(&["-a", "-b", "b0"]),
        expected: &[Expect::new(
            SET,
            "key1.key1val0[5]",
            "here you go with a new one",
        )],
        start: reftree()?,
        outcome: yaml(
            r"
key0:
  key0val0: [key0val0val0, key0val0val1, key0val0val2]
  key0val1: [key0val1val0, key0val1val1, key0val1val2]
key1:
  key1val0: [key1val0val0, key1val0val1, key1val0val2, '', '', here you go with a new one]
  key1val1: [key1val1val0, key1val1val1, key1val1val2]
",
        )?,
    })
}

#[rstest]
#[case::quotes_in_the_value(&["-a", "-n", "key1.key1val2='here you go with a new one'", "-b", "b0"])]
#[case::quotes_in_the_arg(&["-a", "-n", "'key1.key1val2=here you go with a new one'", "-b", "b0"])]
fn maps_gain_new_keys(#[case] input: &[&str]) -> Result<()> {
    let mut outcome = reftree()?;
    common::conf(outcome.set_path("key1.key1val2", "here you go with a new one"))?;
    check_opts(Scenario {
        specs: SPECS,
        input: args(input),
        filtered: args(&["-a", "-b", "b0"]),
        expected: &[Expect::new(SET, "key1.key1val2", "here you go with a new one")],
        start: reftree()?,
        outcome,
    })
}

#[rstest]
#[case::quotes_in_the_value(&[
    "-a", "-n", "key1.key1val0[1]='{nothing: really, actually: something}'", "-b", "b0",
    "--node", "key1.key1val1=\"[more, items, like, this, are, appended]\"", "-c", "c0", "c1",
    "-n", "key1.key1val0[1]='{Jacquesson: [741, 742], Gosset: Grande Reserve}'",
])]
#[case::quotes_in_the_arg(&[
    "-a", "-n", "'key1.key1val0[1]={nothing: really, actually: something}'", "-b", "b0",
    "--node", "\"key1.key1val1=[more, items, like, this, are, appended]\"", "-c", "c0", "c1",
    "-n", "'key1.key1val0[1]={Jacquesson: [741, 742], Gosset: Grande Reserve}'",
])]
fn composite_fragments_deep_merge(#[case] input: &[&str]) -> Result<()> {
    check_opts(Scenario {
        specs: SPECS,
        input: args(input),
        filtered: args(&["-a", "-b", "b0", "-c", "c0", "c1"]),
        expected: &[
            Expect::new(SET, "key1.key1val0[1]", "{nothing: really, actually: something}"),
            Expect::new(SET, "key1.key1val1", "[more, items, like, this, are, appended]"),
            Expect::new(
                SET,
                "key1.key1val0[1]",
                "{Jacquesson: [741, 742], Gosset: Grande Reserve}",
            ),
        ],
        start: reftree()?,
        outcome: yaml(
            r"
key0:
  key0val0: [key0val0val0, key0val0val1, key0val0val2]
  key0val1: [key0val1val0, key0val1val1, key0val1val2]
key1:
  key1val0:
    - key1val0val0
    - nothing: really
      actually: something
      Jacquesson: [741, 742]
      Gosset: Grande Reserve
    - key1val0val2
  key1val1: [key1val1val0, key1val1val1, key1val1val2, more, items, like, this, are, appended]
",
        )?,
    })
}

#[rstest]
fn callbacks_and_nodes_interleave() -> Result<()> {
    let mut outcome = reftree()?;
    common::conf(outcome.set_path("key0.key0val0[0]", "key0val0val0-action1"))?;
    common::conf(outcome.set_path("key1.key1val1", "val"))?;
    check_opts(Scenario {
        specs: SPECS,
        input: args(&["-a1", "-n", "key1.key1val1=\"val\"", "-b", "b0"]),
        filtered: args(&["-b", "b0"]),
        expected: &[
            Expect::new(ActionKind::Callback, "", ""),
            Expect::new(SET, "key1.key1val1", "val"),
        ],
        start: reftree()?,
        outcome,
    })
}

#[rstest]
fn untargeted_fragments_merge_at_the_root() -> Result<()> {
    check_opts(Scenario {
        specs: SPECS,
        input: args(&["--node", "{key0: {key0val1: [extra]}, key2: fresh}"]),
        filtered: Vec::new(),
        expected: &[Expect::new(SET, "", "{key0: {key0val1: [extra]}, key2: fresh}")],
        start: reftree()?,
        outcome: yaml(
            r"
key0:
  key0val0: [key0val0val0, key0val0val1, key0val0val2]
  key0val1: [key0val1val0, key0val1val1, key0val1val2, extra]
key1:
  key1val0: [key1val0val0, key1val0val1, key1val0val2]
  key1val1: [key1val1val0, key1val1val1, key1val1val2]
key2: fresh
",
        )?,
    })
}

#[rstest]
fn numeric_looking_payloads_keep_their_spelling() -> Result<()> {
    check_opts(Scenario {
        specs: SPECS,
        input: args(&["-n", "app.version=1.10", "-n", "app.mode=0755", "-n", "app.mask=0x1F"]),
        filtered: Vec::new(),
        expected: &[
            Expect::new(SET, "app.version", "1.10"),
            Expect::new(SET, "app.mode", "0755"),
            Expect::new(SET, "app.mask", "0x1F"),
        ],
        start: Tree::new(),
        outcome: yaml("app: {version: 1.10, mode: 0755, mask: 0x1F}")?,
    })
}
