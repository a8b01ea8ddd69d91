use std::path::Path;

use anyhow::Result;

use azx_config::{REQUIRED_VARS, Settings, is_placeholder};

struct Checklist {
    passed: usize,
    total: usize,
    issues: Vec<String>,
}

impl Checklist {
    fn new() -> Self {
        Self {
            passed: 0,
            total: 0,
            issues: Vec::new(),
        }
    }

    fn record(&mut self, description: &str, ok: bool, fix: &str) {
        self.total += 1;
        if ok {
            self.passed += 1;
            println!("  ✓ {}", description);
        } else {
            println!("  ✗ {}", description);
            self.issues.push(format!("{}: {}", description, fix));
        }
    }
}

/// Splits a service's variables into (missing, placeholder) lists.
fn variable_status(settings: &Settings, vars: &[&str]) -> (Vec<String>, Vec<String>) {
    let mut missing = Vec::new();
    let mut placeholders = Vec::new();
    for var in vars {
        match settings.lookup(var) {
            None => missing.push(var.to_string()),
            Some(value) if value.trim().is_empty() => missing.push(var.to_string()),
            Some(value) if is_placeholder(&value) => placeholders.push(var.to_string()),
            Some(_) => {}
        }
    }
    (missing, placeholders)
}

pub fn handle(settings: &Settings) -> Result<()> {
    let mut checklist = Checklist::new();

    println!("azx setup check");
    println!("{}", "=".repeat(50));

    println!();
    println!("Configuration file:");
    match settings.env_file().path() {
        Some(path) => {
            checklist.record(&format!("env file loaded from {}", path.display()), true, "")
        }
        None => checklist.record(
            "env file found",
            false,
            "create config/.env (or pass --env-file) with your Azure credentials",
        ),
    }

    println!();
    println!("Azure credentials:");
    for (service, vars) in REQUIRED_VARS {
        let (missing, placeholders) = variable_status(settings, vars);
        let ok = missing.is_empty() && placeholders.is_empty();
        let mut fixes = Vec::new();
        if !missing.is_empty() {
            fixes.push(format!("set {}", missing.join(", ")));
        }
        if !placeholders.is_empty() {
            fixes.push(format!(
                "replace the placeholder values in {}",
                placeholders.join(", ")
            ));
        }
        checklist.record(service, ok, &fixes.join("; "));
    }

    println!();
    println!("Output location:");
    checklist.record(
        "working directory is writable",
        dir_is_writable(Path::new(".")),
        "run azx from a directory you can write to",
    );

    println!();
    println!("{}", "=".repeat(50));
    println!("Checks passed: {}/{}", checklist.passed, checklist.total);

    if checklist.issues.is_empty() {
        println!("✓ Setup looks complete");
        Ok(())
    } else {
        println!();
        println!("Issues to fix:");
        for issue in &checklist.issues {
            println!("  - {}", issue);
        }
        std::process::exit(1);
    }
}

/// Probes a directory by creating and removing a scratch file.
fn dir_is_writable(dir: &Path) -> bool {
    let probe = dir.join(".azx-write-probe");
    match std::fs::write(&probe, b"probe") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}
