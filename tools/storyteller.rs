/// Storyteller — interactive shell for building a story one fragment at a time.
///
/// Usage: storyteller [--genre <name>] [--seed <n>] [--catalog <path>] [--export-dir <dir>]
///
/// Commands:
///   start              — begin a new story from a genre opener
///   continue           — append a genre continuation
///   twist              — append a random twist
///   add <text>         — append your own text
///   clear              — throw the story away
///   genre [name]       — show or change the genre
///   show / stats / log — redraw the story, its numbers, or its build log
///   export [dir]       — write the story to a text file
///   seed [n]           — show or reset the RNG seed
///   help               — list commands
///   quit               — exit

use chrono::Local;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use story_loom::core::session::{Action, StorySession};
use story_loom::core::view::StoryView;
use story_loom::schema::genre::Genre;

#[derive(Parser, Debug)]
#[command(name = "storyteller", version, about = "Interactive story builder")]
struct Args {
    /// Starting genre: fantasy, mystery, sci-fi, horror, adventure
    #[arg(long, default_value = "fantasy")]
    genre: Genre,

    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Catalog overrides file (RON) merged over the built-in templates
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory that `export` writes to by default
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut builder = StorySession::builder().genre(args.genre);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(ref path) = args.catalog {
        builder = builder.catalog_path(path);
    }
    let mut session = match builder.build() {
        Ok(session) => session,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    println!("Genre: {}", session.genre());
    println!("Seed: {}", session.seed());
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("story> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        let action = match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
                continue;
            }
            "start" | "new" => Action::Start,
            "continue" | "c" => Action::Continue,
            "twist" | "t" => Action::Twist,
            "add" | "write" => Action::AddCustomText(rest.to_string()),
            "clear" => Action::Clear,
            "genre" => {
                if rest.is_empty() {
                    let names: Vec<&str> = Genre::ALL.iter().map(|g| g.name()).collect();
                    println!("Current genre: {}", session.genre());
                    println!("  Available: {}", names.join(", "));
                    continue;
                }
                match rest.parse::<Genre>() {
                    Ok(genre) => {
                        session.select_genre(genre);
                        println!("Genre set to {}", genre);
                    }
                    Err(e) => println!("{}", e),
                }
                continue;
            }
            "show" => {
                print_story(&StoryView::render(&session));
                continue;
            }
            "stats" => {
                print_stats(&StoryView::render(&session));
                continue;
            }
            "log" => {
                print_log(&StoryView::render(&session));
                continue;
            }
            "export" | "save" => {
                let dir = if rest.is_empty() {
                    args.export_dir.clone()
                } else {
                    PathBuf::from(rest)
                };
                match session.export(Local::now().naive_local()) {
                    Ok(export) => match export.write_to_dir(&dir) {
                        Ok(path) => println!("Saved {} ({} bytes)", path.display(), export.bytes().len()),
                        Err(e) => println!("ERROR: {}", e),
                    },
                    Err(notice) => println!("{}", notice),
                }
                continue;
            }
            "seed" => {
                if rest.is_empty() {
                    println!("Current seed: {}", session.seed());
                    continue;
                }
                match rest.parse::<u64>() {
                    Ok(seed) => {
                        session.reseed(seed);
                        println!("Seed set to {}", seed);
                    }
                    Err(_) => println!("Invalid seed: {}", rest),
                }
                continue;
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
                continue;
            }
        };

        match session.apply(action) {
            Ok(()) => print_story(&StoryView::render(&session)),
            Err(notice) if notice.is_visible() => println!("{}", notice),
            Err(_) => {}
        }
    }
}

fn print_story(view: &StoryView) {
    println!("\n--- {} ---", view.heading);
    match (&view.text, view.placeholder) {
        (Some(text), _) => println!("{}", text),
        (None, Some(placeholder)) => println!("{}", placeholder),
        (None, None) => {}
    }
    println!("--- End ---\n");
    print_stats(view);
}

fn print_stats(view: &StoryView) {
    if let Some(stats) = view.stats {
        println!(
            "Words: {}  Characters: {}  Continuations: {}\n",
            stats.words, stats.characters, stats.continuations
        );
    }
}

fn print_log(view: &StoryView) {
    if view.log.is_empty() {
        println!("The build log is empty.");
        return;
    }
    println!("Build log:");
    for entry in &view.log {
        println!("  Step {}: {}", entry.step, entry.preview);
    }
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  start           Start a new story in the current genre");
    println!("  continue        Continue the story");
    println!("  twist           Add a random twist");
    println!("  add <text>      Add your own text to the story");
    println!("  clear           Clear the story");
    println!("  genre [name]    Show or change the genre");
    println!("  show            Show the story");
    println!("  stats           Show word, character, and continuation counts");
    println!("  log             Show the build log");
    println!("  export [dir]    Save the story as a text file");
    println!("  seed [n]        Show or reset the RNG seed");
    println!("  help            Show this help");
    println!("  quit            Exit");
    println!();
    println!("Tips for better stories:");
    println!("  - Use 'twist' to get unexpected turns");
    println!("  - Write your own continuations with 'add' for custom plots");
    println!("  - Try different genres for variety");
    println!("  - Export your finished stories");
    println!("  - Mix automatic and manual storytelling");
}
