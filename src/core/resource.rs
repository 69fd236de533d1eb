//! # LUT 리소스 관리자
//!
//! 출처 헤더와 한 줄당 하나의 16진 값으로 이루어진 `.hex` 파일을 쓰고 읽는다.
//! 쓰기는 같은 디렉토리의 임시 파일에 끝까지 기록한 뒤 이름을 바꾸므로,
//! 파일은 완전히 쓰여 있거나 아예 없다.

use crate::core::codec::{self, ByteOrder, Dtype, Scalar};
use crate::core::config::Provenance;
use crate::core::error::{LutError, Result};
use crate::core::table::LookupTable;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const HEX_EXTENSION: &str = "hex";
const NOT_AVAILABLE: &str = "N/A";

/// 덮어쓰기 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// 항상 쓴다
    Allow,
    /// 파일이 있으면 실패
    Refuse,
    /// 검사하지 않는다 (호출자 책임)
    Ignore,
}

fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// 관리 디렉토리 하나에 대한 `.hex` 읽기/쓰기
#[derive(Debug, Clone)]
pub struct HexLutManager {
    dir: PathBuf,
    provenance: Provenance,
}

impl HexLutManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), provenance: Provenance::default() }
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 확장자가 없으면 `.hex`를 붙이고, 다른 확장자는 거부한다.
    /// `Refuse` 정책에서 파일이 이미 있으면 실패한다.
    pub fn resolve_path(&self, file_name: &str, policy: OverwritePolicy) -> Result<PathBuf> {
        let name = Path::new(file_name);
        let name = match name.extension().and_then(|e| e.to_str()) {
            None => name.with_extension(HEX_EXTENSION),
            Some(HEX_EXTENSION) => name.to_path_buf(),
            Some(other) => return Err(LutError::InvalidExtension(other.to_string())),
        };
        let path = self.dir.join(name);
        if policy == OverwritePolicy::Refuse && path.exists() {
            return Err(LutError::FileExists(path));
        }
        Ok(path)
    }

    /// 출처 헤더 (모든 줄이 `//`로 시작한다)
    pub fn render_header(&self, table: &LookupTable, order: ByteOrder) -> String {
        let source = table.source().to_string();
        let accuracy = table.accuracy();
        let command = if table.command().is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            table.command().replace(['\n', '\r'], " ")
        };
        let author = match (&self.provenance.author_name, &self.provenance.author_email) {
            (None, None) => format!("{NOT_AVAILABLE} {NOT_AVAILABLE}"),
            (name, email) => format!("{} {}", or_na(name.as_deref()), or_na(email.as_deref())),
        };

        let lines = [
            format!("// Coefficient memory for {source}"),
            "// ----------------------------------------------".to_string(),
            format!("//   Bits per coeff.:          {}", table.bit_width()),
            format!("//   Endianness.:              {}", order.resolve()),
            format!("//   Table mode:               {}", or_na(table.fold_mode())),
            format!("//   Table size:               {}kB", table.table_size_kb()),
            format!("//   LOP (level of precision): {}", or_na(table.precision_mode())),
            format!("//   Effective scaling factor: {}", or_na(table.scale_factor())),
            format!("//   Measured avg. accuracy:   {}", or_na(accuracy.map(|r| r.avg_abs_error))),
            format!("//   Min accuracy:             {}", or_na(accuracy.map(|r| r.min_abs_error))),
            format!("//   Max accuracy:             {}", or_na(accuracy.map(|r| r.max_abs_error))),
            "//".to_string(),
            format!("// Each line contains a value (coeff.) corresponding to the function {source}."),
            format!("// This file was automatically generated with the command: {command}"),
            "// *Do not* make any manual changes to this file".to_string(),
            format!("// File generated @ {}", self.provenance.stamp()),
            format!("// Author: {author}"),
            "//".to_string(),
            "//".to_string(),
        ];
        let mut header = lines.join("\n");
        header.push('\n');
        header
    }

    /// 헤더와 값을 기록한다. `order`가 없으면 테이블의 바이트 순서를 쓴다.
    pub fn write(
        &self,
        file_name: &str,
        table: &LookupTable,
        policy: OverwritePolicy,
        order: Option<ByteOrder>,
    ) -> Result<PathBuf> {
        let path = self.resolve_path(file_name, policy)?;
        let order = order.unwrap_or_else(|| table.endianness());

        let staged = tempfile::NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(staged.as_file());
            writer.write_all(self.render_header(table, order).as_bytes())?;
            for value in table.values() {
                writeln!(writer, "{}", codec::encode(value, order))?;
            }
            writer.flush()?;
        }
        staged.as_file().sync_all()?;

        match policy {
            OverwritePolicy::Refuse => staged.persist_noclobber(&path).map_err(|e| {
                if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                    LutError::FileExists(path.clone())
                } else {
                    LutError::Io(e.error)
                }
            })?,
            OverwritePolicy::Allow | OverwritePolicy::Ignore => staged.persist(&path).map_err(|e| LutError::Io(e.error))?,
        };

        log::debug!("wrote {} values to {}", table.len(), path.display());
        Ok(path)
    }

    /// 선행 주석/빈 줄을 건너뛰고 나머지 줄을 `dtype`으로 디코딩한다
    pub fn read(&self, file_name: &str, dtype: Dtype, order: ByteOrder) -> Result<Vec<Scalar>> {
        let path = self.resolve_path(file_name, OverwritePolicy::Ignore)?;
        let reader = BufReader::new(fs::File::open(&path)?);

        let mut values = Vec::new();
        let mut in_header = true;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if in_header && (line.is_empty() || line.starts_with("//")) {
                continue;
            }
            in_header = false;
            if line.is_empty() {
                continue;
            }
            values.push(codec::decode(line, dtype, order)?);
        }
        Ok(values)
    }
}
