//! Контейнер .gt3x — zip-архив с `info.txt` и `log.bin`.

use std::{
    fs::File,
    io::{Read, Seek},
    path::Path,
};

use gt3x_types::{Gt3xError, Gt3xResult};
use log::debug;
use zip::{result::ZipError, ZipArchive};

use crate::{
    config::DecodeConfig,
    decode::{decode_with_config, ActivityLog},
};

/// Оба файла архива, прочитанные в память.
#[derive(Debug, Clone)]
pub struct Gt3xArchive {
    info_text: String,
    log_bytes: Vec<u8>,
}

impl Gt3xArchive {
    pub fn open<P: AsRef<Path>>(
        path: P,
        config: &DecodeConfig,
    ) -> Gt3xResult<Self> {
        let file = File::open(path.as_ref())?;
        debug!("Opening {:?}", path.as_ref());
        Self::from_reader(file, config)
    }

    pub fn from_reader<R: Read + Seek>(
        reader: R,
        config: &DecodeConfig,
    ) -> Gt3xResult<Self> {
        let mut archive = ZipArchive::new(reader).map_err(zip_error)?;

        let mut info_text = String::new();
        member(&mut archive, &config.metadata_member)?.read_to_string(&mut info_text)?;

        let mut log_bytes = Vec::new();
        member(&mut archive, &config.log_member)?.read_to_end(&mut log_bytes)?;

        debug!(
            "Archive members: {} = {} bytes, {} = {} bytes",
            config.metadata_member,
            info_text.len(),
            config.log_member,
            log_bytes.len()
        );

        Ok(Self {
            info_text,
            log_bytes,
        })
    }

    pub fn info_text(&self) -> &str {
        &self.info_text
    }

    pub fn log_bytes(&self) -> &[u8] {
        &self.log_bytes
    }

    pub fn decode(
        &self,
        config: &DecodeConfig,
    ) -> Gt3xResult<ActivityLog> {
        decode_with_config(&self.info_text, &self.log_bytes, config)
    }
}

/// Открывает файл .gt3x и декодирует его с параметрами по умолчанию.
pub fn read_gt3x<P: AsRef<Path>>(path: P) -> Gt3xResult<ActivityLog> {
    read_gt3x_with_config(path, &DecodeConfig::default())
}

pub fn read_gt3x_with_config<P: AsRef<Path>>(
    path: P,
    config: &DecodeConfig,
) -> Gt3xResult<ActivityLog> {
    Gt3xArchive::open(path, config)?.decode(config)
}

fn member<'a, R: Read + Seek>(
    archive: &'a mut ZipArchive<R>,
    name: &str,
) -> Gt3xResult<impl Read + 'a> {
    archive.by_name(name).map_err(|e| match e {
        ZipError::FileNotFound => Gt3xError::MissingMember(name.to_string()),
        other => zip_error(other),
    })
}

fn zip_error(e: ZipError) -> Gt3xError {
    match e {
        ZipError::Io(e) => Gt3xError::Io(e),
        other => Gt3xError::archive(other.to_string()),
    }
}
