//! Command line interface for keyshift.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use keyshift::tools::{self, ToolConfig};
use keyshift::{parse, serialize, transpose, KeySignature};

#[derive(Parser)]
#[command(name = "keyshift", version, about = "Transpose MusicXML scores between keys")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print score metadata (detected key, time signature, part name)
    Info {
        score: PathBuf,
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Transpose a score to a new key
    Transpose {
        score: PathBuf,
        /// Target key: fifths (-7..=7) or a tonic name like "D" or "Bb"
        #[arg(long)]
        to: KeySignature,
        /// Source key override; defaults to the key declared in the score
        #[arg(long)]
        from: Option<KeySignature>,
        /// Output path; defaults to <score>_transposed_to_<tonic>.xml
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run optical music recognition on a scanned score (PDF or image)
    Recognize { input: PathBuf },
    /// Render a MusicXML score to PDF
    Render {
        score: PathBuf,
        /// Output path; defaults to the input with a .pdf extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Info { score, json } => info(&score, json),
        Command::Transpose {
            score,
            to,
            from,
            output,
        } => run_transpose(&score, to, from, output),
        Command::Recognize { input } => {
            let config = ToolConfig::from_env();
            let output = tools::recognize(&config, &input)?;
            println!("{}", output.display());
            Ok(())
        }
        Command::Render { score, output } => {
            let config = ToolConfig::from_env();
            let pdf = tools::render_pdf(&config, &score, output.as_deref())?;
            println!("{}", pdf.display());
            Ok(())
        }
    }
}

fn load_score(path: &Path) -> Result<keyshift::Score> {
    // Compressed .mxl archives are unpacked next to themselves first
    let path = if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mxl"))
    {
        tools::unpack_mxl(path)
            .with_context(|| format!("failed to unpack {}", path.display()))?
    } else {
        path.to_path_buf()
    };

    let xml = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(&xml).with_context(|| format!("failed to parse {}", path.display()))
}

fn info(path: &Path, json: bool) -> Result<()> {
    let summary = load_score(path)?.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    match (summary.key_fifths, &summary.key_name) {
        (Some(fifths), Some(name)) => println!("Key:            {} major (fifths {})", name, fifths),
        (Some(fifths), None) => println!("Key:            fifths {}", fifths),
        _ => println!("Key:            unknown"),
    }
    match summary.time_signature {
        Some(time) => println!("Time signature: {}/{}", time.beats, time.beat_type),
        None => println!("Time signature: unknown"),
    }
    println!(
        "Part:           {}",
        summary.part_name.as_deref().unwrap_or("unnamed")
    );
    println!("Parts:          {}", summary.part_count);
    println!("Measures:       {}", summary.measure_count);
    println!("Notes:          {}", summary.note_count);
    Ok(())
}

fn run_transpose(
    path: &Path,
    to: KeySignature,
    from: Option<KeySignature>,
    output: Option<PathBuf>,
) -> Result<()> {
    let score = load_score(path)?;

    let source_fifths = match from.map(|key| key.fifths()).or_else(|| score.declared_key()) {
        Some(fifths) => fifths,
        None => bail!(
            "{} declares no key signature; pass --from to set one",
            path.display()
        ),
    };

    let transposed = transpose(&score, source_fifths, to.fifths())
        .with_context(|| format!("failed to transpose {}", path.display()))?;

    let output = output.unwrap_or_else(|| {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("score");
        path.with_file_name(format!("{}_transposed_to_{}.xml", stem, to.tonic_name()))
    });

    fs::write(&output, serialize(&transposed))
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Transposed to {} -> {}", to, output.display());
    Ok(())
}
