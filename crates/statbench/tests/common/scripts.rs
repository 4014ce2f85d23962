//! Shell scripts standing in for a benchmark binary

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

static EXEC_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that write and then execute scripts.
///
/// Executing a file while another thread's fork still holds a write handle
/// to it fails with ETXTBSY.
pub fn lock() -> MutexGuard<'static, ()> {
    EXEC_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct ScriptDir {
    dir: TempDir,
}

impl ScriptDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write an executable script and return its path
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}

/// Script printing `output` verbatim and exiting with `code`
pub fn fixed_script(dir: &ScriptDir, name: &str, output: &str, code: i32) -> PathBuf {
    fs::write(dir.path().join(format!("{name}.out")), output).unwrap();
    dir.script(name, &format!("#!/bin/sh\ncat {name}.out\nexit {code}\n"))
}

/// Script reporting its own invocation count as the parse time
pub fn counter_script(dir: &ScriptDir, name: &str) -> PathBuf {
    dir.script(
        name,
        "#!/bin/sh\nn=$(cat count 2>/dev/null || echo 0)\nn=$((n+1))\necho $n > count\n\
         echo \"counter | Parse: $n.0 μs | Serialize: 1.0 μs | ✓ PASS\"\n",
    )
}
