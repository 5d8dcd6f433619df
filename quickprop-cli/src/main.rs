use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use quickprop::{Gen, arbitrary, create_seeded_rng, resolve_seed, sample, sample_shrinks, tuple_of};
use rand::seq::SliceRandom;
use std::fmt::Debug;
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "quickprop")]
#[command(about = "Inspect the values and shrink candidates of QuickProp generators", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print sampled values, one line per type
    Sample {
        #[command(flatten)]
        options: SampleOptions,
    },
    /// Print sampled values with their shrink candidates
    Shrink {
        #[command(flatten)]
        options: SampleOptions,

        /// Shuffle the shrink candidates before printing
        #[arg(long)]
        shuffle: bool,
    },
}

#[derive(Args)]
struct SampleOptions {
    /// Number of values per type; also caps the candidates shown per value
    #[arg(short = 'n', long, default_value_t = 20)]
    count: usize,

    /// Seed for the random generator (defaults to QUICKPROP_SEED, then the clock)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Types to sample: bool char i8 u8 i16 u16 i32 u32 i64 u64 isize usize
    /// f32 f64 string pair tuple vec
    #[arg(required = true)]
    types: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Sample,
    Shrink { shuffle: bool },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (options, mode) = match cli.command {
        Commands::Sample { options } => (options, Mode::Sample),
        Commands::Shrink { options, shuffle } => (options, Mode::Shrink { shuffle }),
    };

    let seed = resolve_seed(options.seed).context("Failed to determine the seed")?;
    eprintln!("{}", format!("seed {seed}").bright_black());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for token in &options.types {
        let recognized = print_type(&mut out, token, options.count, seed, mode)
            .context("Failed to write output")?;
        if !recognized {
            writeln!(out, "{}", format!("unrecognized type \"{token}\"").yellow())?;
        }
    }
    out.flush()?;

    Ok(())
}

/// Print samples for `token`; `false` if the token names no known type.
fn print_type(out: &mut dyn Write, token: &str, count: usize, seed: u32, mode: Mode) -> io::Result<bool> {
    match token {
        "bool" => print_generator(out, token, &arbitrary::<bool>(), count, seed, mode)?,
        "char" => print_generator(out, token, &arbitrary::<char>(), count, seed, mode)?,
        "i8" => print_generator(out, token, &arbitrary::<i8>(), count, seed, mode)?,
        "u8" => print_generator(out, token, &arbitrary::<u8>(), count, seed, mode)?,
        "i16" => print_generator(out, token, &arbitrary::<i16>(), count, seed, mode)?,
        "u16" => print_generator(out, token, &arbitrary::<u16>(), count, seed, mode)?,
        "i32" => print_generator(out, token, &arbitrary::<i32>(), count, seed, mode)?,
        "u32" => print_generator(out, token, &arbitrary::<u32>(), count, seed, mode)?,
        "i64" => print_generator(out, token, &arbitrary::<i64>(), count, seed, mode)?,
        "u64" => print_generator(out, token, &arbitrary::<u64>(), count, seed, mode)?,
        "isize" => print_generator(out, token, &arbitrary::<isize>(), count, seed, mode)?,
        "usize" => print_generator(out, token, &arbitrary::<usize>(), count, seed, mode)?,
        "f32" => print_generator(out, token, &arbitrary::<f32>(), count, seed, mode)?,
        "f64" => print_generator(out, token, &arbitrary::<f64>(), count, seed, mode)?,
        "string" => print_generator(out, token, &arbitrary::<String>(), count, seed, mode)?,
        "pair" => print_generator(out, token, &arbitrary::<(i32, i32)>(), count, seed, mode)?,
        "tuple" => {
            let triples = tuple_of((arbitrary::<i32>(), arbitrary::<i32>(), arbitrary::<i32>()));
            print_generator(out, token, &triples, count, seed, mode)?
        }
        "vec" => print_generator(out, token, &arbitrary::<Vec<i32>>(), count, seed, mode)?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn print_generator<T>(
    out: &mut dyn Write,
    token: &str,
    generator: &Gen<T>,
    count: usize,
    seed: u32,
    mode: Mode,
) -> io::Result<()>
where
    T: Clone + Debug + 'static,
{
    match mode {
        Mode::Sample => {
            let values: Vec<String> = sample(generator, count, seed)
                .iter()
                .map(|value| format!("{value:?}"))
                .collect();
            writeln!(out, "{}", values.join(" "))
        }
        Mode::Shrink { shuffle } => {
            writeln!(out, "{}", format!("{token}:").bold())?;
            let mut rng = create_seeded_rng(seed);
            for (value, mut shrinks) in sample_shrinks(generator, count, seed) {
                if shuffle {
                    shrinks.shuffle(&mut rng);
                }
                shrinks.truncate(count);
                let shown: Vec<String> = shrinks.iter().map(|s| format!("{s:?}")).collect();
                writeln!(out, "{value:?} -> {}", shown.join(" "))?;
            }
            Ok(())
        }
    }
}
