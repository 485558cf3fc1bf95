use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clex_lexicon::{symbols, KeywordClassifier, Lexicon};
use clex_protocol::{Category, Dialect, LexiconData, Revision};
use log::info;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Classifies words against the C keyword vocabularies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report which vocabularies each word belongs to
    Classify(ClassifyArgs),
    /// Compile a JSON lexicon into a binary (rkyv) lexicon
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print a built-in lexicon as JSON
    Dump(SelectArgs),
}

#[derive(Args)]
struct SelectArgs {
    #[arg(short, long, value_enum, default_value_t = RevisionArg::C17)]
    revision: RevisionArg,

    /// Enable a compiler's extension keywords (repeatable)
    #[arg(short, long = "dialect", value_enum)]
    dialects: Vec<DialectArg>,
}

#[derive(Args)]
struct ClassifyArgs {
    #[command(flatten)]
    select: SelectArgs,

    /// Load this lexicon (.json or binary) instead of the built-in tables
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["revision", "dialects"])]
    lexicon: Option<PathBuf>,

    /// Add NAME to the extension vocabulary, as `#define NAME` would
    #[arg(short = 'D', long = "define", value_name = "NAME")]
    defines: Vec<String>,

    /// Print the reports as a JSON array
    #[arg(long)]
    json: bool,

    #[arg(required = true)]
    words: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum RevisionArg {
    C90,
    C99,
    C11,
    C17,
    C23,
}

impl From<RevisionArg> for Revision {
    fn from(arg: RevisionArg) -> Self {
        match arg {
            RevisionArg::C90 => Revision::C90,
            RevisionArg::C99 => Revision::C99,
            RevisionArg::C11 => Revision::C11,
            RevisionArg::C17 => Revision::C17,
            RevisionArg::C23 => Revision::C23,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Gnu,
    Msvc,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Gnu => Dialect::Gnu,
            DialectArg::Msvc => Dialect::Msvc,
        }
    }
}

impl SelectArgs {
    fn lexicon(&self) -> Lexicon {
        Lexicon::builder()
            .revision(self.revision.into())
            .dialects(self.dialects.iter().map(|d| Dialect::from(*d)))
            .build()
    }
}

#[derive(Debug, Serialize, PartialEq)]
struct Report {
    word: String,
    categories: Vec<Category>,
    defined: bool,
    symbol: bool,
}

impl Report {
    fn new(classifier: &KeywordClassifier, word: &str) -> Self {
        let flags = classifier.classify(word);
        Self {
            word: word.to_string(),
            categories: flags.categories().collect(),
            defined: classifier.is_defined(word),
            symbol: symbols::is_symbol_word(word),
        }
    }

    fn labels(&self) -> String {
        let mut labels: Vec<&str> = self.categories.iter().map(|c| c.name()).collect();
        if self.defined {
            labels.push("defined");
        }
        if self.symbol {
            labels.push("symbol");
        }
        if labels.is_empty() {
            "-".to_string()
        } else {
            labels.join(",")
        }
    }
}

fn read_document(path: &Path) -> anyhow::Result<LexiconData> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&input).with_context(|| format!("invalid JSON lexicon {}", path.display()))
}

fn load_classifier(args: &ClassifyArgs) -> anyhow::Result<KeywordClassifier> {
    let mut classifier = match &args.lexicon {
        Some(path) if path.extension().is_some_and(|ext| ext == "json") => {
            let data = read_document(path)?;
            KeywordClassifier::from_data(&data)
                .with_context(|| format!("invalid lexicon {}", path.display()))?
        }
        Some(path) => {
            let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            let data = clex_lexicon::decode(&bytes)
                .with_context(|| format!("invalid binary lexicon {}", path.display()))?;
            KeywordClassifier::from_data(&data)
                .with_context(|| format!("invalid lexicon {}", path.display()))?
        }
        None => KeywordClassifier::new(args.select.lexicon()),
    };

    for name in &args.defines {
        classifier.add_to_extension_vocabulary(name);
    }
    info!(
        "classifying against {} lexicon with {} defined names",
        classifier.lexicon().revision(),
        classifier.defined().len()
    );
    Ok(classifier)
}

fn classify(args: &ClassifyArgs) -> anyhow::Result<()> {
    let classifier = load_classifier(args)?;
    let reports: Vec<Report> = args.words.iter().map(|w| Report::new(&classifier, w)).collect();
    write_reports(&mut io::stdout().lock(), &reports, args.json)
}

fn write_reports(out: &mut impl Write, reports: &[Report], json: bool) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
    } else {
        for report in reports {
            writeln!(out, "{}\t{}", report.word, report.labels())?;
        }
    }
    Ok(())
}

fn compile(input: &Path, output: &Path) -> anyhow::Result<()> {
    info!("reading JSON lexicon from {}", input.display());
    let data = read_document(input)?;

    // Reject anything the classifier would refuse to load later.
    let classifier = KeywordClassifier::from_data(&data)
        .with_context(|| format!("invalid lexicon {}", input.display()))?;
    info!(
        "compiling {} lexicon with {} vocabulary entries",
        classifier.lexicon().revision(),
        data.vocabularies.len()
    );

    let bytes = clex_lexicon::encode(&data)?;
    fs::write(output, &bytes).with_context(|| format!("failed to write {}", output.display()))?;

    info!("wrote {} bytes to {}", bytes.len(), output.display());
    Ok(())
}

fn dump(select: &SelectArgs) -> anyhow::Result<()> {
    write_dump(&mut io::stdout().lock(), select)
}

fn write_dump(out: &mut impl Write, select: &SelectArgs) -> anyhow::Result<()> {
    let data = select.lexicon().to_data();
    writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Classify(args) => classify(args),
        Command::Compile { input, output } => compile(input, output),
        Command::Dump(select) => dump(select),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn classify_args(argv: &[&str]) -> ClassifyArgs {
        let cli = Cli::try_parse_from(argv).expect("valid arguments");
        match cli.command {
            Command::Classify(args) => args,
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify() {
        let args = classify_args(&[
            "clex", "classify", "-r", "c99", "-d", "gnu", "-D", "FOO", "--json", "while", "FOO",
        ]);
        assert!(args.json);
        assert_eq!(args.defines, vec!["FOO"]);
        assert_eq!(args.words, vec!["while", "FOO"]);

        let lexicon = args.select.lexicon();
        assert_eq!(lexicon.revision(), Revision::C99);
        assert_eq!(lexicon.dialects(), &[Dialect::Gnu]);
    }

    #[test]
    fn test_classify_requires_words() {
        assert!(Cli::try_parse_from(["clex", "classify"]).is_err());
        assert!(Cli::try_parse_from(["clex", "classify", "-r", "c89", "int"]).is_err());
    }

    #[test]
    fn test_lexicon_file_conflicts_with_selection() {
        assert!(Cli::try_parse_from(["clex", "classify", "-l", "c90.json", "-r", "c23", "int"]).is_err());
        assert!(Cli::try_parse_from(["clex", "classify", "-l", "c90.json", "-d", "gnu", "int"]).is_err());

        let args = classify_args(&["clex", "classify", "-l", "c90.json", "-D", "FOO", "int"]);
        assert_eq!(args.lexicon, Some(PathBuf::from("c90.json")));
    }

    /// A fresh path under the system temp dir, unique per test.
    fn scratch_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("clex-{}-{}", std::process::id(), name));
        let _ = fs::remove_file(&path);
        path
    }

    fn write_document(path: &Path, data: &LexiconData) {
        fs::write(path, serde_json::to_string(data).expect("serialize")).expect("write document");
    }

    #[test]
    fn test_compile_then_classify_binary() {
        let json = scratch_path("c90.json");
        let binary = scratch_path("c90.rkyv");

        let mut data = Lexicon::new(Revision::C90).to_data();
        data.defined = vec!["NDEBUG".to_string()];
        write_document(&json, &data);

        compile(&json, &binary).expect("compile");
        assert!(binary.exists());

        let path = binary.to_str().expect("utf-8 temp path");
        let args = classify_args(&["clex", "classify", "-l", path, "int"]);
        let classifier = load_classifier(&args).expect("binary lexicon");
        assert_eq!(classifier.lexicon().revision(), Revision::C90);
        assert!(classifier.is_in_vocabulary(Category::Standard, "int"));
        assert!(!classifier.is_in_vocabulary(Category::Standard, "_Bool"));
        assert!(classifier.is_defined("NDEBUG"));

        fs::remove_file(&json).ok();
        fs::remove_file(&binary).ok();
    }

    #[test]
    fn test_classify_json_lexicon() {
        let json = scratch_path("msvc.json");
        let data = Lexicon::builder().dialect(Dialect::Msvc).build().to_data();
        write_document(&json, &data);

        let path = json.to_str().expect("utf-8 temp path");
        let args = classify_args(&["clex", "classify", "--lexicon", path, "-D", "WIN32", "__declspec"]);
        let classifier = load_classifier(&args).expect("json lexicon");
        assert!(classifier.is_in_vocabulary(Category::CompilerExtension, "__declspec"));
        assert!(classifier.is_defined("WIN32"));

        fs::remove_file(&json).ok();
    }

    #[test]
    fn test_compile_rejects_bad_version() {
        let json = scratch_path("v7.json");
        let binary = scratch_path("v7.rkyv");

        let mut data = Lexicon::new(Revision::C11).to_data();
        data.version = 7;
        write_document(&json, &data);

        let err = compile(&json, &binary).expect_err("version 7 is unsupported");
        assert!(format!("{err:#}").contains("unsupported lexicon format version 7"));
        assert!(!binary.exists());

        fs::remove_file(&json).ok();
    }

    #[test]
    fn test_unreadable_and_malformed_inputs() {
        let missing = scratch_path("missing.json");
        let err = compile(&missing, &scratch_path("missing.rkyv")).expect_err("no input");
        assert!(format!("{err:#}").contains("failed to read"));

        let garbage = scratch_path("garbage.rkyv");
        fs::write(&garbage, b"not a lexicon").expect("write garbage");
        let path = garbage.to_str().expect("utf-8 temp path");
        let args = classify_args(&["clex", "classify", "-l", path, "int"]);
        let err = load_classifier(&args).expect_err("garbage archive");
        assert!(format!("{err:#}").contains("invalid binary lexicon"));

        let bad_json = scratch_path("bad.json");
        fs::write(&bad_json, "{ \"version\": ").expect("write bad json");
        let err = read_document(&bad_json).expect_err("truncated json");
        assert!(format!("{err:#}").contains("invalid JSON lexicon"));

        fs::remove_file(&garbage).ok();
        fs::remove_file(&bad_json).ok();
    }

    #[test]
    fn test_reports() {
        let args = classify_args(&["clex", "classify", "-D", "FOO", "if", "FOO", "whilst", "{"]);
        let classifier = load_classifier(&args).expect("built-in lexicon");

        let labels: Vec<String> = args
            .words
            .iter()
            .map(|w| Report::new(&classifier, w).labels())
            .collect();
        assert_eq!(labels, vec!["standard,preprocessor", "defined", "-", "symbol"]);

        let report = Report::new(&classifier, "_Pragma");
        assert_eq!(report.categories, vec![Category::NonPreprocessorOnly]);
        assert!(!report.defined);
    }

    /// Stands in for a stdout whose reader has gone away.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_closed_output_is_an_error() {
        let select = SelectArgs {
            revision: RevisionArg::C17,
            dialects: Vec::new(),
        };
        assert!(write_dump(&mut ClosedPipe, &select).is_err());

        let classifier = KeywordClassifier::default();
        let reports = vec![Report::new(&classifier, "int")];
        assert!(write_reports(&mut ClosedPipe, &reports, false).is_err());
        assert!(write_reports(&mut ClosedPipe, &reports, true).is_err());

        let mut buffer = Vec::new();
        write_reports(&mut buffer, &reports, false).expect("in-memory write");
        assert_eq!(String::from_utf8(buffer).expect("utf-8"), "int\tstandard\n");
    }

    #[test]
    fn test_dump_is_loadable() {
        let select = SelectArgs {
            revision: RevisionArg::C23,
            dialects: vec![DialectArg::Msvc],
        };
        let json = serde_json::to_string(&select.lexicon().to_data()).expect("serialize");
        let data: LexiconData = serde_json::from_str(&json).expect("deserialize");

        let classifier = KeywordClassifier::from_data(&data).expect("valid lexicon");
        assert!(classifier.is_in_vocabulary(Category::CompilerExtension, "__declspec"));
        assert!(classifier.is_in_vocabulary(Category::Standard, "constexpr"));
    }
}
