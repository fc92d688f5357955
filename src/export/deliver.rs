// OrrLab: iBGP route reflection lab config synthesizer
// Copyright (C) 2024-2025 The orrlab authors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! File-based delivery: write one `<hostname>.conf` per node into a
//! directory. Pushing the files onto live devices (or into version control)
//! is a separate concern that consumes this directory.

use std::fs;
use std::path::PathBuf;

use log::info;

use super::{ConfigSink, DeliverError};

/// A [`ConfigSink`] writing rendered configurations as `<hostname>.conf`
/// files into a directory. The directory is created on first delivery.
#[derive(Debug, Clone)]
pub struct ConfigDir {
    dir: PathBuf,
}

impl ConfigDir {
    /// Create a sink for the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ConfigSink for ConfigDir {
    fn deliver(&mut self, hostname: &str, config: &str) -> Result<(), DeliverError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{hostname}.conf"));
        fs::write(&path, config)?;
        info!("wrote configuration of {} to {}", hostname, path.display());
        Ok(())
    }
}
