use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use rpg_dice_expr::{evaluate_det_with, evaluate_float_with, evaluate_int_with, evaluate_str_with};
use tracing::Level;

/// Roll a dice notation such as `adv(1d20)+5` or `round(avg(4d8)/2)`.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    notation: String,

    /// How to print the result.
    #[arg(short, long, value_enum, default_value_t = Output::Str)]
    output: Output,

    /// Seed the rng to get the same rolls every time.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log the resolved notation.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    Int,
    Float,
    Str,
    Det,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let notation = args.notation.as_str();
    let output = match args.output {
        Output::Int => evaluate_int_with(notation, &mut rng).map(|value| value.to_string()),
        Output::Float => evaluate_float_with(notation, &mut rng).map(|value| value.to_string()),
        Output::Str => evaluate_str_with(notation, &mut rng),
        Output::Det => evaluate_det_with(notation, &mut rng),
    };

    match output {
        Ok(output) => println!("{output}"),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
}
