// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Chatflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Chatflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Chatflow CLI entrypoint.
//!
//! Lays out a flow document (or the built-in demo conversation) and prints the result as
//! JSON on stdout. Logging goes to stderr and is controlled by `RUST_LOG`.

use std::error::Error;
use std::path::PathBuf;

use chatflow::layout::{layout_document, LayoutOptions};
use chatflow::model::fixtures::demo_conversation;
use chatflow::store::FlowStore;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <document.json> [--config <layout.json>] [--write]\n  {program} --demo [--config <layout.json>]\n\nPrints the layout of the document as JSON.\n--config reads layout options (rankdir, nodesep, ranksep, nodeSize, sortByCombo, controlPoints, comboPadding, ranker, edgesep, marginx, marginy).\n--write stores the computed node positions back into the document."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    document: Option<PathBuf>,
    config: Option<PathBuf>,
    write: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.config = Some(PathBuf::from(path));
            }
            "--write" => {
                if options.write {
                    return Err(());
                }
                options.write = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.document.is_some() {
                    return Err(());
                }
                options.document = Some(PathBuf::from(arg));
            }
        }
    }

    if options.demo == options.document.is_some() {
        return Err(());
    }
    if options.demo && options.write {
        return Err(());
    }

    Ok(options)
}

fn main() {
    env_logger::init();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "chatflow".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let layout_options = match &options.config {
            Some(path) => LayoutOptions::from_json(&std::fs::read_to_string(path)?)?,
            None => LayoutOptions::default(),
        };

        let mut store = match &options.document {
            Some(path) => FlowStore::load(path)?,
            None => FlowStore::from_document(demo_conversation())?,
        };

        let result = layout_document(&store.snapshot(), &layout_options);
        println!("{}", serde_json::to_string_pretty(&result)?);

        if let (true, Some(path)) = (options.write, &options.document) {
            if store.apply_layout(&result) {
                store.save(path)?;
                log::info!(path:? = path, rev = store.rev(); "positions written back");
            }
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("chatflow: {err}");
        std::process::exit(1);
    }
}
