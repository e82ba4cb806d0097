use std::io::{self, Write};
use std::process::ExitCode;

use deepflags::config::Config;
use deepflags::{flag, flag_set, print_help, short_flag, Flag, Group, ParseArgs, Repeated, Switch, Vector};
use tracing_subscriber::EnvFilter;

flag_set! {
    /// One file to show in its own tab.
    struct DisplayFile {
        file: Flag<String> = flag("file")
            .short('f')
            .value_name("PATH")
            .description("Specifies the file to read (reads from stdin by default)."),
        label: Flag<String> = flag("label")
            .short('l')
            .value_name("LABEL")
            .description("Assigns a label to this file's tab."),
        bookmarks: Vector<i32> = flag("bookmark")
            .short('b')
            .value_name("LINE")
            .description("Line numbers to bookmark in this file."),
        create_if_missing: Switch = short_flag('p').description(
            "Denotes that if this file does not exist, it should be created. If bookmarks \
             are specified, the file will be sized to contain the largest bookmark.",
        ),
    }
}

flag_set! {
    struct AllFlags {
        help: Switch = flag("help").short('h').description("Print this help and exit."),
        files: Repeated<DisplayFile> = flag("display")
            .short('D')
            .description("Create a tab to display a given file."),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(io::stderr)
        .init();
}

fn describe(file: &DisplayFile) -> String {
    let mut line = match file.file.value() {
        Some(path) => format!("I will load \"{}\", ", path),
        None => "I will read from stdin, ".to_string(),
    };
    if let Some(label) = file.label.value() {
        line.push_str(&format!("labeling the tab \"{}\", ", label));
    }
    if let Some((last, rest)) = file.bookmarks.values().split_last() {
        line.push_str("bookmarking lines ");
        for bookmark in rest {
            line.push_str(&format!("{}, ", bookmark));
        }
        if !rest.is_empty() {
            line.push_str("and ");
        }
        line.push_str(&format!("{}, ", last));
    }
    line.push_str(if file.create_if_missing.is_present() {
        "creating the file"
    } else {
        "bailing"
    });
    line.push_str(" if the file doesn't exist.");
    line
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let config = Config::load()?;

    let mut flags = Group::<AllFlags>::root();
    if !flags.parse_args(std::env::args()) {
        return Ok(ExitCode::from(2));
    }

    let mut stdout = io::stdout().lock();
    if flags.help.is_present() {
        print_help(&flags, &config.help, &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }

    let files = flags.files.values();
    writeln!(stdout, "I was told to load {} files.", files.len())?;
    for file in files {
        writeln!(stdout, "{}", describe(file))?;
    }
    Ok(ExitCode::SUCCESS)
}
