//! Shared testing utilities for fundalloc CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Venue rows for the three reference situations:
/// proposal 1 has two venues with equal capacity and weight,
/// proposal 2 has one small and one large venue,
/// proposal 3 has a single bootstrap-eligible venue with no balance.
pub const SCENARIO_VENUES: &str = "\
proposal_id,contract_address,percentage,denom,deployment_type,existing_tvl,bootstrap_eligible
1,neutron1lend,50,uatom,lending,900000,false
1,neutron1dex,50,uatom,dex,400000,false
2,neutron1small,50,uatom,dex,40000,false
2,neutron1large,50,uatom,dex,1000000,false
3,neutron1fresh,100,uatom,dex,0,true
";

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `fundalloc` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("fundalloc").expect("Failed to locate fundalloc binary");
        cmd.current_dir(&self.work_dir).env_remove("RUST_LOG").env_remove("FUNDALLOC_LCD_URL");
        cmd
    }

    /// Write `content` to `name` inside the work directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.work_dir.join(name)).expect("Failed to read test file")
    }

    /// Write `fundalloc.toml` with the reference policy and an optional service section.
    pub fn write_config(&self, total_budget: f64, lcd_url: Option<&str>) -> PathBuf {
        let mut content = format!(
            "[allocation]\ntotal_budget = {total_budget:?}\n\n\
             [allocation.venue_fractions]\nlending = 0.1\ndex = 0.2\n"
        );
        if let Some(url) = lcd_url {
            content.push_str(&format!(
                "\n[service]\nlcd_url = \"{url}\"\ncontract_address = \"neutron1hydro\"\n\
                 round_id = 2\ntranche_id = 1\nproposal_limit = 100\n\
                 timeout_secs = 5\nmax_retries = 1\nretry_delay_ms = 1\n"
            ));
        }
        self.write("fundalloc.toml", &content)
    }

    /// Write a snapshot with one proposal per `(id, percentage, title)`.
    pub fn write_snapshot(&self, proposals: &[(u64, &str, &str)]) -> PathBuf {
        let records: Vec<serde_json::Value> = proposals
            .iter()
            .map(|(id, percentage, title)| {
                serde_json::json!({
                    "proposal_id": id,
                    "title": title,
                    "round_id": 2,
                    "tranche_id": 1,
                    "percentage": percentage,
                })
            })
            .collect();
        let content = serde_json::to_string_pretty(&records).expect("Failed to encode snapshot");
        self.write("snapshot.json", &content)
    }
}
