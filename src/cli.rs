use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::ast::FileInput;
use crate::diagnostics;
use crate::interpreter::Interpreter;

/// Reads the parser's JSON output from a file, or from stdin when no
/// path is given.
fn read_tree_source(input: &Option<PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("could not read syntax tree from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_tree(text: &str) -> anyhow::Result<FileInput> {
    serde_json::from_str(text).context("input is not a valid syntax tree")
}

pub fn run(input: Option<PathBuf>) -> anyhow::Result<()> {
    let text = read_tree_source(&input)?;
    let tree = parse_tree(&text)?;

    let mut interpreter = Interpreter::new(true);
    if let Err(err) = interpreter.run(&tree) {
        diagnostics::report_runtime_error(&err);
        bail!("program aborted");
    }
    Ok(())
}

pub fn check(input: Option<PathBuf>) -> anyhow::Result<()> {
    let text = read_tree_source(&input)?;
    let tree = parse_tree(&text)?;
    println!("OK: {} top-level statements", tree.statements.len());
    Ok(())
}
