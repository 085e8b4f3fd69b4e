use clap::Parser;
use minic_compiler::{compile_to_ast, compile_to_ir};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minic")]
#[command(about = "Verify a minic source file and print its lowered IR")]
struct Args {
    /// Path to the source file to compile
    file: PathBuf,

    /// Print the parsed tree instead of compiling
    #[arg(long)]
    ast: bool,
}

fn main() {
    let args = Args::parse();

    let src = fs::read_to_string(&args.file).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", args.file.display(), e);
        std::process::exit(1);
    });

    if args.ast {
        match compile_to_ast(&src) {
            Ok(program) => println!("{program:#?}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        return;
    }

    match compile_to_ir(&src) {
        Ok(module) => print!("{module}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
