use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn get_promptpipe_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_promptpipe"))
}

pub const MODEL_PY: &str = r#"import json


class Config:
    def __init__(self, path):
        self.path = path


class Loader(Config):
    def load(self):
        with open(self.path) as f:
            return json.load(f)
"#;

pub const TEMPLATE: &str = "Refactor this class:\n{code}\n\nNotes: {notes}\nReturn JSON as {{\"ok\": true}}.";

/// Scratch directory holding a config file and its inputs
pub struct Workspace {
    dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Workspace with `model.py`, `notes.txt`, `template.txt` and a config
    /// reading them through the class extractor
    pub fn standard(api_extra: &str) -> (Self, PathBuf) {
        let ws = Self::new();
        ws.write("model.py", MODEL_PY);
        ws.write("notes.txt", "keep the public API");
        ws.write("template.txt", TEMPLATE);

        let config = ws.write_config(&format!(
            r#"inp:
  - name: code
    file: ${{root_dir}}/model.py
    extractor:
      name: ClassExtractor
      take_only: last
  - name: notes
    file: ${{root_dir}}/notes.txt
template: ${{root_dir}}/template.txt
api:
  type: openai
  model: gpt-4o-mini
  extractor:
    name: PythonCodeExtractor
    take_only: last
{}
out:
  file: ${{root_dir}}/out/result.py
"#,
            api_extra
        ));
        (ws, config)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn write_config(&self, yaml: &str) -> PathBuf {
        self.write("conf.yaml", yaml)
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }
}
