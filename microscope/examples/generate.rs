//! Lens generation example.
//!
//! Parses a Swift file, extracts its types and writes one lens artifact per
//! structure. Without arguments, prints the lenses for a built-in sample.
//!
//! Run with: cargo run --example generate -- <Input.swift> <package> <output_dir>
//!
//! Set `RUST_LOG=debug` to see dropped declarations.

use anyhow::{Context, bail};
use microscope::prelude::*;
use std::path::PathBuf;

const SAMPLE: &str = r#"
import Foundation

public protocol Statement {}

public struct IfStatement: Statement {
    public enum ElseClause {
        case elseIf(IfStatement)
        case `else`(CodeBlock)
    }

    public let condition: Expression
    public let codeBlock: CodeBlock
    public let elseClause: ElseClause?
}

public struct CodeBlock {
    public let statements: [Statement]
    public let label: String
}
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let factory = OpticsFactory::new();

    match args.as_slice() {
        [] => print_sample(&factory),
        [input, package, output] => {
            let tree = factory
                .parse_file(input)
                .with_context(|| format!("Failed to load {input}"))?;

            let mut database = TypeDatabase::new();
            let summary = factory
                .convert_types(&mut database, &tree)
                .context("Type conversion stopped")?;
            println!(
                "Found {} structures and {} choices",
                summary.structures.len(),
                summary.choices.len()
            );

            let written = factory.write_structure_microscope(
                PathBuf::from(output),
                package,
                &database.literal_stypes(),
            )?;
            for path in written {
                println!("  {}", path.display());
            }
            Ok(())
        }
        _ => bail!("usage: generate <Input.swift> <package> <output_dir>"),
    }
}

fn print_sample(factory: &OpticsFactory) -> anyhow::Result<()> {
    let tree = factory
        .parse_source(SAMPLE)
        .context("Sample failed to parse")?;
    let mut database = TypeDatabase::new();
    factory
        .convert_types(&mut database, &tree)
        .context("Type conversion stopped")?;

    println!("Relations:");
    for relation in database.relations() {
        println!("  {relation}");
    }

    let types = database.literal_stypes();
    for structure in types.iter().filter_map(SType::as_structure) {
        println!();
        println!("// {}", factory.config().file_name(&structure.name));
        print!("{}", factory.generate_structure_microscope("Syntax", structure)?);
    }
    Ok(())
}
