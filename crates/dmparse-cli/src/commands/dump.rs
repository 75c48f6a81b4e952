use std::fs;
use std::path::PathBuf;

use dmparse::{Options, SourceFile};

use crate::cli::DumpView;

pub struct DumpArgs {
    pub file_path: PathBuf,
    pub view: DumpView,
    pub tab_width: u32,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let text = match fs::read_to_string(&args.file_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: failed to read `{}`: {}", args.file_path.display(), e);
            std::process::exit(1);
        }
    };

    let file = match parse(&text, args.tab_width) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if !file.diagnostics().is_empty() {
        let path = args.file_path.display().to_string();
        eprint!(
            "{}",
            file.diagnostics()
                .printer(&text)
                .path(&path)
                .colored(args.color)
                .render()
        );
    }
    print!("{}", render(&file, args.view));
}

pub fn parse(text: &str, tab_width: u32) -> dmparse::Result<SourceFile> {
    let options = Options {
        tab_width,
        ..Options::default()
    };
    SourceFile::parse(text, None, &options)
}

pub fn render(file: &SourceFile, view: DumpView) -> String {
    match view {
        DumpView::Tokens => file.tokens().dump(),
        DumpView::Declarations => file.unit().dump(file.tokens()),
        DumpView::Context => file.context().dump(),
    }
}
