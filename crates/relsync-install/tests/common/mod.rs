#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use sha2::{Digest, Sha256};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, zip_bytes(entries)).unwrap();
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

pub const LITE: &[(&str, &[u8])] = &[
    ("bin/", b""),
    ("bin/app.exe", b"app v2"),
    ("resource/data.json", b"{}"),
];

pub const LITE_WITH_DEPS: &[(&str, &[u8])] = &[
    ("bin/app.exe", b"app v2"),
    ("deps/runtime.dll", b"bundled runtime"),
];

pub const FULL: &[(&str, &[u8])] = &[
    ("bin/app.exe", b"app v2"),
    ("deps/", b""),
    ("deps/runtime.dll", b"runtime"),
    ("deps/python/lib.py", b"print()"),
];
