//! Word-Pager CLI (for inspecting layouts)
//! The main interface is through the library and its WASM bindings.
//!
//! Usage: `word-pager <document.json> [options.json]`

use std::process::ExitCode;
use word_pager::{layout, Document, GreedyLineBreaker, LayoutOptions, PageLayoutResult};

fn run(document_path: &str, options_path: Option<&str>) -> Result<PageLayoutResult, String> {
    let document_json = std::fs::read_to_string(document_path)
        .map_err(|e| format!("Failed to read {}: {}", document_path, e))?;
    let document = Document::from_json(&document_json).map_err(|e| e.to_string())?;

    let options = match options_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path, e))?;
            LayoutOptions::from_json(&json).map_err(|e| e.to_string())?
        }
        None => LayoutOptions::default(),
    };

    log::info!(
        "Laying out {} sections, {} blocks",
        document.section_count(),
        document.block_count()
    );
    layout(&document, &options, &GreedyLineBreaker::new()).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(document_path) = args.get(1) else {
        eprintln!("Usage: word-pager <document.json> [options.json]");
        return ExitCode::from(2);
    };

    let result = match run(document_path, args.get(2).map(String::as_str)) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Word-Pager Layout");
    println!("=================");
    println!("Pages: {}", result.total_pages);
    println!();

    for page in &result.pages {
        let lines: usize = page.content.iter().map(|c| c.lines().len()).sum();
        let tables = page.content.iter().filter(|c| c.is_table()).count();
        println!(
            "Page {:>3}  section {:>2}  {} fragments  {} lines  {} tables  {:.1}px used{}{}",
            page.page_number,
            page.section_index,
            page.content.len(),
            lines,
            tables,
            page.placed_height(),
            if page.header.is_some() { "  [header]" } else { "" },
            if page.footer.is_some() { "  [footer]" } else { "" },
        );
    }

    ExitCode::SUCCESS
}
