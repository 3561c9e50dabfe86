// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of tweesplit and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! tweesplit CLI entrypoint.
//!
//! Every invocation restores the saved state from the state directory, runs one command and
//! saves the state again if it changed.

use std::error::Error;
use std::path::{Path, PathBuf};

use tweesplit::export::{ExportDestination, TweeExporter};
use tweesplit::model::GroupId;
use tweesplit::query::{filter_passages, PassageFilter, SearchKind};
use tweesplit::source::JsonPassageFile;
use tweesplit::store::{StateFolder, WriteDurability};
use tweesplit::workspace::{LoadOutcome, NoticeKind, Workspace};

const DEFAULT_STATE_DIR: &str = ".tweesplit";
const DEFAULT_LOG_LEVEL: &str = "info";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--state-dir <dir>] [--log-level <level>] [--log-dir <dir>] [--durable-writes] <command>\n\nCommands:\n  open <passages.json>            load a parsed passage list (resets groups)\n  passages [--tag <t>] [--search <q>] [--fuzzy]\n                                  list passages, unassigned first\n  links                           print the link graph\n  layout                          print canvas positions\n  auto-group                      one group per first tag\n  groups                          list groups\n  new-group                       create an empty group\n  assign <group-id> <name>...     move passages into a group\n  rename <group-id> <filename>    change a group's output filename\n  remove <group-id>               delete a group\n  export --out <dir> | --zip <path>\n                                  write one .twee file per group\n\nThe state directory defaults to `{DEFAULT_STATE_DIR}`.\n--log-dir writes rotated log files instead of logging to stderr.\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Open(String),
    Passages { tag: Option<String>, search: Option<String>, fuzzy: bool },
    Links,
    Layout,
    AutoGroup,
    Groups,
    NewGroup,
    Assign { group: String, names: Vec<String> },
    Rename { group: String, filename: String },
    Remove(String),
    Export(ExportTo),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExportTo {
    Directory(String),
    Zip(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    state_dir: Option<String>,
    log_level: Option<String>,
    log_dir: Option<String>,
    durable_writes: bool,
    command: Option<Command>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--state-dir" => {
                if options.state_dir.is_some() {
                    return Err(());
                }
                options.state_dir = Some(args.next().ok_or(())?);
            }
            "--log-level" => {
                if options.log_level.is_some() {
                    return Err(());
                }
                options.log_level = Some(args.next().ok_or(())?);
            }
            "--log-dir" => {
                if options.log_dir.is_some() {
                    return Err(());
                }
                options.log_dir = Some(args.next().ok_or(())?);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                options.command = Some(parse_command(&arg, &mut args)?);
                break;
            }
        }
    }

    if options.command.is_none() {
        return Err(());
    }

    Ok(options)
}

fn parse_command(name: &str, args: &mut impl Iterator<Item = String>) -> Result<Command, ()> {
    let rest = args.collect::<Vec<_>>();
    let command = match (name, rest.as_slice()) {
        ("open", [path]) => Command::Open(path.clone()),
        ("passages", flags) => parse_passages_flags(flags)?,
        ("links", []) => Command::Links,
        ("layout", []) => Command::Layout,
        ("auto-group", []) => Command::AutoGroup,
        ("groups", []) => Command::Groups,
        ("new-group", []) => Command::NewGroup,
        ("assign", [group, names @ ..]) if !names.is_empty() => {
            Command::Assign { group: group.clone(), names: names.to_vec() }
        }
        ("rename", [group, filename]) => {
            Command::Rename { group: group.clone(), filename: filename.clone() }
        }
        ("remove", [group]) => Command::Remove(group.clone()),
        ("export", [flag, path]) if flag == "--out" => Command::Export(ExportTo::Directory(path.clone())),
        ("export", [flag, path]) if flag == "--zip" => Command::Export(ExportTo::Zip(path.clone())),
        _ => return Err(()),
    };
    Ok(command)
}

fn parse_passages_flags(flags: &[String]) -> Result<Command, ()> {
    let mut tag = None;
    let mut search = None;
    let mut fuzzy = false;
    let mut flags = flags.iter();

    while let Some(flag) = flags.next() {
        match flag.as_str() {
            "--tag" if tag.is_none() => tag = Some(flags.next().ok_or(())?.clone()),
            "--search" if search.is_none() => search = Some(flags.next().ok_or(())?.clone()),
            "--fuzzy" if !fuzzy => fuzzy = true,
            _ => return Err(()),
        }
    }

    Ok(Command::Passages { tag, search, fuzzy })
}

fn group_id(raw: &str) -> Result<GroupId, Box<dyn Error>> {
    Ok(GroupId::new(raw)?)
}

fn require_group(ws: &Workspace, raw: &str) -> Result<GroupId, Box<dyn Error>> {
    let id = group_id(raw)?;
    if ws.groups().get(&id).is_none() {
        return Err(format!("unknown group {id}").into());
    }
    Ok(id)
}

fn print_groups(ws: &Workspace) {
    for group in ws.groups().groups() {
        println!(
            "{}\t{}\t{}",
            group.id(),
            group.filename(),
            group.passage_names().join(", ")
        );
    }
}

fn run(options: CliOptions, ws: &mut Workspace, durability: WriteDurability) -> Result<(), Box<dyn Error>> {
    let Some(command) = options.command else {
        return Ok(());
    };

    match command {
        Command::Open(path) => {
            if let LoadOutcome::Applied { passages } = ws.open_file(&JsonPassageFile, Path::new(&path)) {
                println!("opened {path}: {passages} passages, {} links", ws.links().len());
            }
        }
        Command::Passages { tag, search, fuzzy } => {
            let mut filter = PassageFilter::new().with_query(search.unwrap_or_default());
            if let Some(tag) = tag {
                filter = filter.with_tag(tag);
            }
            if fuzzy {
                filter = filter.with_kind(SearchKind::Fuzzy);
            }
            let assigned = ws.groups().assigned_names();
            for passage in filter_passages(ws.passages(), &assigned, &filter) {
                let group = ws.groups().group_of(passage.name()).map(|g| g.filename()).unwrap_or("-");
                println!("{}\t{}\t{}", passage.name(), passage.tags().unwrap_or(""), group);
            }
        }
        Command::Links => {
            for link in ws.links() {
                println!("{} -> {}", link.source(), link.target());
            }
        }
        Command::Layout => {
            for node in ws.canvas_nodes() {
                let origin = ws
                    .layout()
                    .placement(&node.name)
                    .map(|p| format!("{:?}", p.origin()).to_lowercase())
                    .unwrap_or_default();
                println!("{}\t{},{}\t{origin}", node.name, node.position.x, node.position.y);
            }
        }
        Command::AutoGroup => {
            ws.auto_group();
            print_groups(ws);
        }
        Command::Groups => print_groups(ws),
        Command::NewGroup => {
            let id = ws.groups_mut().create_group();
            println!("{id}");
        }
        Command::Assign { group, names } => {
            let id = require_group(ws, &group)?;
            for name in &names {
                if ws.passage(name).is_none() {
                    log::warn!("event=assign_unknown_passage name={name}");
                    eprintln!("tweesplit: warning: {name:?} is not in the open document");
                }
            }
            ws.groups_mut().assign(&id, names);
        }
        Command::Rename { group, filename } => {
            let id = require_group(ws, &group)?;
            ws.groups_mut().rename(&id, filename);
        }
        Command::Remove(group) => {
            let id = require_group(ws, &group)?;
            ws.groups_mut().remove(&id);
        }
        Command::Export(to) => {
            let destination = match to {
                ExportTo::Directory(dir) => ExportDestination::Directory(PathBuf::from(dir)),
                ExportTo::Zip(path) => ExportDestination::Archive(PathBuf::from(path)),
            };
            let passages = ws.passages().to_vec();
            let exporter = TweeExporter::new(&passages).with_durability(durability);
            ws.export(&exporter, destination);
        }
    }

    Ok(())
}

fn main() {
    let result = (|| -> Result<bool, Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "tweesplit".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let level = options.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
        tweesplit::logging::init_logging(level, options.log_dir.as_deref().map(Path::new))?;

        let durability = if options.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        };
        let state_dir = options.state_dir.clone().unwrap_or_else(|| DEFAULT_STATE_DIR.to_owned());
        let folder = StateFolder::new(state_dir).with_durability(durability);

        let mut ws = Workspace::new();
        ws.restore(&folder, &JsonPassageFile);
        run(options, &mut ws, durability)?;
        ws.persist(&folder);

        let mut failed = false;
        for notice in ws.take_notices() {
            match notice.kind {
                NoticeKind::Info => println!("{}", notice.message),
                NoticeKind::Warning => eprintln!("tweesplit: warning: {}", notice.message),
                NoticeKind::Error => {
                    failed = true;
                    eprintln!("tweesplit: {}", notice.message);
                }
            }
        }
        Ok(!failed)
    })();

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("tweesplit: {err}");
            std::process::exit(1);
        }
    }
}
