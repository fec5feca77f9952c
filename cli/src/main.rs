use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use ember_idl_compiler::error::IdlError;
use ember_idl_compiler::{compile_schema, parse, table_to_json, CompileOptions};

#[derive(Parser)]
#[command(name = "ember-idl-cli")]
#[command(about = "Compile `.idl` schemas to C++ headers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a C++ header from an `.idl` schema file
    Generate {
        /// Input `.idl` file
        #[arg(short, long)]
        input: PathBuf,

        /// Output `.h` file (defaults to same name + `.h`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the ImGui reflection member functions for each struct
        #[arg(long)]
        ui_reflection: bool,

        /// Upper bound on declared + primitive types for this run
        #[arg(long, default_value_t = 256)]
        max_types: usize,
    },

    /// Parse a schema and report the declared types without emitting code
    Check {
        /// Input `.idl` file
        #[arg(short, long)]
        input: PathBuf,

        /// Upper bound on declared + primitive types for this run
        #[arg(long, default_value_t = 256)]
        max_types: usize,
    },

    /// Parse a schema and print the resulting type table as JSON
    Dump {
        /// Input `.idl` file
        #[arg(short, long)]
        input: PathBuf,

        /// Upper bound on declared + primitive types for this run
        #[arg(long, default_value_t = 256)]
        max_types: usize,
    },
}

fn main() -> Result<(), IdlError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate { input, output, ui_reflection, max_types } => {
            let text = fs::read_to_string(input).map_err(IdlError::Io)?;
            let options = CompileOptions {
                type_capacity: *max_types,
                ui_reflection: *ui_reflection,
            };
            // Compile fully before touching the output path, so a failed
            // run never leaves a partial artifact behind.
            let code = compile_schema(&text, &options)?;
            let out_path = if let Some(o) = output {
                o.clone()
            } else {
                let mut p = input.clone();
                p.set_extension("h");
                p
            };
            fs::write(&out_path, &code).map_err(IdlError::Io)?;
            println!("Compiled {} → {}", input.display(), out_path.display());
            Ok(())
        }

        Commands::Check { input, max_types } => {
            let text = fs::read_to_string(input).map_err(IdlError::Io)?;
            let table = parse(&text, *max_types)?;
            println!(
                "{}: {} types (including primitives)",
                input.display(),
                table.len()
            );
            Ok(())
        }

        Commands::Dump { input, max_types } => {
            let text = fs::read_to_string(input).map_err(IdlError::Io)?;
            let table = parse(&text, *max_types)?;
            println!("{}", table_to_json(&table));
            Ok(())
        }
    }
}
