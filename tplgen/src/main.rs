use arch::reader::Template;
use color_print::cprintln;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

use tplgen::builder::Generator;
use tplgen::config::{Config, OnUnknown};
use tplgen::error::Error;
use tplgen::source::RowSource;
use tplgen::{dump, msg};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[clap(short, long, global = true, default_value_t = Level::WARN)]
    log_level: Level,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Build a template from an instruction table
    Build(BuildArgs),
    /// Print the contents of a template
    Dump(DumpArgs),
    /// Look up the encoding of instruction lines
    Lookup(LookupArgs),
}

#[derive(Debug, clap::Args)]
struct BuildArgs {
    /// Instruction table (YAML)
    #[clap(default_value = "z80.yaml")]
    input: PathBuf,

    /// Output file
    #[clap(short, long, default_value = "z80.tpl")]
    output: PathBuf,

    /// Configuration file (YAML)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// What to do with operands missing from the vocabulary
    #[clap(long, value_enum)]
    on_unknown: Option<OnUnknown>,

    /// Drop the first mnemonic prefix of the table
    #[clap(long)]
    drop_first_prefix: bool,

    /// Accept upper-case register names
    #[clap(long)]
    fold_case: bool,

    /// Order combos by (prefix, code) instead of table order
    #[clap(long)]
    sort: bool,

    /// Version byte written to the header
    #[clap(long)]
    format_version: Option<u8>,
}

impl BuildArgs {
    /// Defaults, then the config file, then flags.
    fn config(&self) -> Result<Config, Error> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(on_unknown) = self.on_unknown {
            cfg.on_unknown = on_unknown;
        }
        if let Some(version) = self.format_version {
            cfg.version = version;
        }
        cfg.drop_first_prefix |= self.drop_first_prefix;
        cfg.fold_case |= self.fold_case;
        cfg.sort_combos |= self.sort;
        Ok(cfg)
    }
}

#[derive(Debug, clap::Args)]
struct DumpArgs {
    /// Template file
    #[clap(default_value = "z80.tpl")]
    input: PathBuf,

    /// Print as YAML
    #[clap(short, long)]
    yaml: bool,

    /// Refuse templates of any other version
    #[clap(long)]
    format_version: Option<u8>,
}

#[derive(Debug, clap::Args)]
struct LookupArgs {
    /// Instruction lines, e.g. "LD a,N"
    #[clap(required = true)]
    lines: Vec<String>,

    /// Template file
    #[clap(short, long, default_value = "z80.tpl")]
    template: PathBuf,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let (source, result) = match &args.command {
        Command::Build(args) => (args.input.display().to_string(), build_template(args)),
        Command::Dump(args) => (args.input.display().to_string(), dump_template(args)),
        Command::Lookup(args) => (args.template.display().to_string(), lookup_lines(args)),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::debug!(?err, "aborted");
            err.print_diag(&source);
            ExitCode::FAILURE
        }
    }
}

fn build_template(args: &BuildArgs) -> Result<bool, Error> {
    let config = args.config()?;
    tracing::debug!(?config, "configuration");

    println!("SIASM Template Generator");
    println!("1. Read Rows");
    println!("  < {}", args.input.display());
    let source = RowSource::load(&args.input)?;
    println!("  - found #{} rows", source.rows.len());

    println!("2. Group Instructions & Write Template");
    println!("  > {}", args.output.display());
    let report = Generator::new(&config).build_file(&source, &args.output)?;
    println!(
        "  - wrote #{} instructions, #{} argument combinations",
        report.instructions, report.combos
    );

    msg::dump(&args.input.display().to_string(), &report.diagnostics);
    Ok(report.is_clean())
}

fn dump_template(args: &DumpArgs) -> Result<bool, Error> {
    let template = Template::load(&args.input)?;
    if let Some(version) = args.format_version {
        template.expect_version(version)?;
    }
    if args.yaml {
        print!("{}", dump::to_yaml(&template)?);
    } else {
        dump::print_dump(&args.input.display().to_string(), &template);
    }
    Ok(true)
}

fn lookup_lines(args: &LookupArgs) -> Result<bool, Error> {
    let template = Template::load(&args.template)?;
    let mut found = true;
    for line in &args.lines {
        match template.lookup_line(line) {
            Some(combo) => cprintln!(
                "<g>{}</> => prefix <y>{:02X}</> opcode <y>{:02X}</>",
                line,
                combo.prefix,
                combo.opcode
            ),
            None => {
                cprintln!("<r>{}</> => not found", line);
                found = false;
            }
        }
    }
    Ok(found)
}
