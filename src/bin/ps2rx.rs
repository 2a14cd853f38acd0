// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use ps2rx::core::config::HwConfig;
use ps2rx::core::error::Result;
use ps2rx::core::memory::map::register_name;
use ps2rx::core::system::{ReadRequest, System};

/// PlayStation 2 hardware register bus inspector
#[derive(Parser)]
#[command(name = "ps2rx")]
#[command(about = "PlayStation 2 EE hardware register bus", long_about = None)]
struct Args {
    /// Path to a TOML hardware configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Register read as ADDR[:WIDTH], e.g. 0x1000F000:32 (repeatable)
    #[arg(short = 'r', long = "read", value_name = "ADDR[:WIDTH]")]
    reads: Vec<ReadRequest>,

    /// Print the SPU2 register table as JSON
    #[arg(long)]
    dump_spu2_table: bool,
}

fn main() -> Result<()> {
    // Load .env file if present; a missing file is not an error
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize logger with default level INFO
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("ps2rx v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HwConfig::load(path).inspect_err(|e| error!("Failed to load config: {}", e))?,
        None => HwConfig::default(),
    };
    config.apply_env_overrides()?;

    let mut system = System::with_config(config)?;

    if args.dump_spu2_table {
        let slots = system.spu2_table().slots();
        println!("{}", serde_json::to_string_pretty(slots)?);
    }

    for request in &args.reads {
        let value = system.read(request.address, request.width)?;
        match register_name(request.address) {
            Some(name) => println!("{} ({}) = {}", request, name, value),
            None => println!("{} = {}", request, value),
        }
    }

    system.flush_trace()?;
    Ok(())
}
