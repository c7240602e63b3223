use std::path::PathBuf;

pub const UPLOAD_HELP: &str = "commands: browse <path> | drag | leave | drop <path>... | process | quit";
pub const RESULT_HELP: &str = "commands: play | end | download | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadCommand {
    Browse(PathBuf),
    Drag,
    Leave,
    Drop(Vec<PathBuf>),
    Process,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultCommand {
    PlayPause,
    End,
    Download,
    Help,
    Quit,
}

/// `browse` takes the rest of the line as one path so names with spaces work;
/// `drop` splits on whitespace.
pub fn parse_upload(line: &str) -> Result<UploadCommand, String> {
    let (word, rest) = split_command(line);
    match word {
        "browse" | "b" if !rest.is_empty() => Ok(UploadCommand::Browse(PathBuf::from(rest))),
        "browse" | "b" => Err("browse needs a file path".to_string()),
        "drag" => Ok(UploadCommand::Drag),
        "leave" => Ok(UploadCommand::Leave),
        "drop" => Ok(UploadCommand::Drop(
            rest.split_whitespace().map(PathBuf::from).collect(),
        )),
        "process" | "p" => Ok(UploadCommand::Process),
        "help" | "?" => Ok(UploadCommand::Help),
        "quit" | "q" | "exit" => Ok(UploadCommand::Quit),
        other => Err(format!("unknown command {other:?}")),
    }
}

pub fn parse_result(line: &str) -> Result<ResultCommand, String> {
    match split_command(line).0 {
        "play" | "pause" | "p" => Ok(ResultCommand::PlayPause),
        "end" => Ok(ResultCommand::End),
        "download" | "d" => Ok(ResultCommand::Download),
        "help" | "?" => Ok(ResultCommand::Help),
        "quit" | "q" | "exit" => Ok(ResultCommand::Quit),
        other => Err(format!("unknown command {other:?}")),
    }
}

fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    }
}
