use std::sync::Mutex;

use super::{RowStore, SettingsLookup};

/// In-process response sheet. Interior mutability so handlers can share it
/// behind an `Arc<dyn RowStore>`.
pub struct MemorySheet {
    inner: Mutex<Inner>,
}

struct Inner {
    rows: Vec<Vec<String>>,
    settings: Option<Settings>,
}

struct Settings {
    master_prompt: Option<String>,
}

impl MemorySheet {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                rows: vec![header],
                settings: Some(Settings {
                    master_prompt: None,
                }),
            }),
        }
    }

    /// Sheet whose settings record was never created. Deployments hit this
    /// when the admin deletes the settings tab.
    pub fn without_settings(header: Vec<String>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                rows: vec![header],
                settings: None,
            }),
        }
    }
}

impl RowStore for MemorySheet {
    fn header(&self) -> Vec<String> {
        self.inner.lock().unwrap().rows[0].clone()
    }

    fn last_row(&self) -> u32 {
        self.inner.lock().unwrap().rows.len() as u32
    }

    fn read_row(&self, row: u32) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        let width = inner.rows[0].len();
        let mut cells = (row as usize)
            .checked_sub(1)
            .and_then(|idx| inner.rows.get(idx))
            .cloned()
            .unwrap_or_default();
        cells.resize(width, String::new());
        cells
    }

    fn write_cell(&self, row: u32, col: u32, value: &str) {
        if row == 0 || col == 0 {
            return;
        }
        let mut inner = self.inner.lock().unwrap();
        let idx = row as usize - 1;
        if idx >= inner.rows.len() {
            return;
        }
        let cells = &mut inner.rows[idx];
        if cells.len() < col as usize {
            cells.resize(col as usize, String::new());
        }
        cells[col as usize - 1] = value.to_string();
    }

    fn append_row(&self, values: Vec<String>) -> u32 {
        let mut inner = self.inner.lock().unwrap();
        inner.rows.push(values);
        inner.rows.len() as u32
    }

    fn master_prompt(&self) -> SettingsLookup {
        let inner = self.inner.lock().unwrap();
        match &inner.settings {
            None => SettingsLookup::MissingRecord,
            Some(settings) => match &settings.master_prompt {
                Some(prompt) if !prompt.trim().is_empty() => {
                    SettingsLookup::Prompt(prompt.clone())
                }
                _ => SettingsLookup::Unset,
            },
        }
    }

    fn set_master_prompt(&self, prompt: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        match &mut inner.settings {
            Some(settings) => {
                settings.master_prompt = Some(prompt.to_string());
                true
            }
            None => false,
        }
    }
}
