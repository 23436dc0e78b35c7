use std::{
    fs,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Trim};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use crate::{
    config::ReportConfig,
    error::{Error, Result},
    record::{Device, DeviceTable, MeasurementRecord, REQUIRED_COLUMNS},
};

/// Load every run folder under `root` into one table.
///
/// Run folders are the directories whose name starts with
/// `config.run_prefix`, visited in sorted-name order. Each contributes the
/// rows of its first results file, tagged with the folder name. A missing
/// root, a folder without a results file, an unreadable file, or an empty
/// file never fails the load; they are logged and skipped.
pub fn load_runs(root: &Path, device: Device, config: &ReportConfig) -> DeviceTable {
    let mut table = DeviceTable::new(device);

    if !root.is_dir() {
        warn!("{device} results directory {} does not exist", root.display());
        return table;
    }

    let folders = match run_folders(root, config) {
        Ok(folders) => folders,
        Err(err) => {
            warn!("could not list {}: {err}", root.display());
            return table;
        }
    };

    let pb = match config.verbose {
        true => {
            let pb = ProgressBar::new(folders.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40} {pos}/{len} {prefix} runs | {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            pb.set_prefix(device.to_string());
            Some(pb)
        }
        false => None,
    };

    for (name, folder) in folders {
        if let Some(ref pb) = pb {
            pb.set_message(name.clone());
            pb.inc(1);
        }

        let Some(csv_path) = find_results_file(&folder, config) else {
            debug!("{} has no results file, skipping", folder.display());
            continue;
        };

        let records = match read_results(&csv_path, device) {
            Ok(records) => records,
            Err(err) => {
                warn!("skipping {}: {err}", csv_path.display());
                continue;
            }
        };

        if records.is_empty() {
            debug!("{} has no rows, skipping", csv_path.display());
            continue;
        }

        debug!("{}: {} rows from {name}", device, records.len());
        table.records.extend(records.into_iter().map(|mut record| {
            record.benchmark = Some(name.clone());
            record
        }));
    }

    if let Some(pb) = pb {
        pb.finish_with_message(format!("{} rows", table.len()));
    }

    info!("loaded {} {device} rows from {}", table.len(), root.display());
    table
}

/// Load the results file found directly in `folder`.
///
/// Used by comparison mode, where every failure is fatal: a missing
/// folder, a missing results file, a malformed file, or a missing required
/// column.
pub fn load_single(folder: &Path, device: Device, config: &ReportConfig) -> Result<DeviceTable> {
    if !folder.is_dir() {
        return Err(Error::FolderNotFound(folder.to_path_buf()));
    }
    let csv_path = find_results_file(folder, config)
        .ok_or_else(|| Error::ResultsFileNotFound(folder.to_path_buf()))?;

    info!("loading {device} results from {}", csv_path.display());
    let records = read_results(&csv_path, device)?;
    Ok(DeviceTable::with_records(device, records))
}

/// First results file in `folder`, by name.
pub fn find_results_file(folder: &Path, config: &ReportConfig) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(folder)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| config.is_results_file(name))
        })
        .map(|entry| entry.path())
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// Parse one results file. The header row must carry every required column.
pub fn read_results(path: &Path, device: Device) -> Result<Vec<MeasurementRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| Error::csv(path, e))?;

    let headers = reader.headers().map_err(|e| Error::csv(path, e))?.clone();
    validate_columns(&headers, device)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<MeasurementRecord>() {
        records.push(row.map_err(|e| Error::csv(path, e))?);
    }
    Ok(records)
}

/// Check that `headers` names every required column.
pub fn validate_columns(headers: &StringRecord, device: Device) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::missing_column(device, column));
        }
    }
    Ok(())
}

/// Sorted `(name, path)` of the run folders under `root`.
fn run_folders(root: &Path, config: &ReportConfig) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if config.is_run_folder(name) {
                folders.push((name.to_string(), entry.path()));
            }
        }
    }
    folders.sort();
    Ok(folders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "model,test_name,tokens,tokens_per_sec,seconds,cpu_percent,mem_mb";

    fn config(root: &Path) -> ReportConfig {
        ReportConfig::builder()
            .with_gpu_root(root)
            .with_cpu_root(root)
            .with_output_dir(root.join("plots"))
            .build()
            .unwrap()
    }

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn validate_columns_names_the_missing_one() {
        let headers = StringRecord::from(vec!["model", "test_name", "tokens_per_sec", "seconds"]);
        let err = validate_columns(&headers, Device::Cpu).unwrap_err();
        assert_eq!(err.to_string(), "CPU results are missing required column 'cpu_percent'");
    }

    #[test]
    fn reads_optional_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results_1.csv");
        write(
            &path,
            "model,test_name,tokens_per_sec,seconds,cpu_percent,mem_mb,vram_mb,extra\n\
             m1,t1,10.5,2,50,100,,x\n\
             m1,t2,11,3,40,90,512,y\n",
        );
        let records = read_results(&path, Device::Gpu).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tokens, None);
        assert_eq!(records[0].vram_mb, None);
        assert_eq!(records[1].vram_mb, Some(512.0));
        assert_eq!(records[0].benchmark, None);
    }

    #[test]
    fn blank_cells_and_float_tokens_are_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results_1.csv");
        write(
            &path,
            &format!("{HEADER}\nm1,t1,10,10,1,,100\nm1,t1,100.0,20,1,50,100\nm1,t1,,30,,50,100\n"),
        );
        let records = read_results(&path, Device::Cpu).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0].cpu_percent.is_nan());
        assert_eq!(records[1].tokens, Some(100.0));
        assert_eq!(records[2].tokens, None);
        assert!(records[2].seconds.is_nan());
        assert_eq!(records[2].tokens_per_sec, 30.0);
    }

    #[test]
    fn find_results_file_takes_first_by_name() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join("results_b.csv"), HEADER);
        write(&dir.path().join("results_a.csv"), HEADER);
        write(&dir.path().join("notes.csv"), HEADER);
        let found = find_results_file(dir.path(), &config(dir.path())).unwrap();
        assert_eq!(found.file_name().unwrap(), "results_a.csv");
    }

    #[test]
    fn load_runs_tags_rows_and_skips_bad_folders() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            &root.join("benchmark_2/results_x.csv"),
            &format!("{HEADER}\nm2,t1,5,1,1,1,1\n"),
        );
        write(
            &root.join("benchmark_1/results_x.csv"),
            &format!("{HEADER}\nm1,t1,5,1,1,1,1\nm1,t2,5,1,1,1,1\n"),
        );
        fs::create_dir_all(root.join("benchmark_3")).unwrap();
        write(&root.join("benchmark_4/results_x.csv"), "model,test_name\nm,t\n");
        write(&root.join("benchmark_5/results_x.csv"), HEADER);
        write(&root.join("other/results_x.csv"), &format!("{HEADER}\nm9,t9,5,1,1,1,1\n"));

        let table = load_runs(root, Device::Gpu, &config(root));
        let tagged: Vec<(&str, &str)> = table
            .records
            .iter()
            .map(|r| (r.model.as_str(), r.benchmark.as_deref().unwrap()))
            .collect();
        assert_eq!(
            tagged,
            vec![("m1", "benchmark_1"), ("m1", "benchmark_1"), ("m2", "benchmark_2")]
        );
    }

    #[test]
    fn load_runs_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let table = load_runs(&dir.path().join("nope"), Device::Cpu, &config(dir.path()));
        assert!(table.is_empty());
        assert_eq!(table.device, Device::Cpu);
    }

    #[test]
    fn load_single_errors() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path());

        let missing = dir.path().join("missing");
        assert!(matches!(
            load_single(&missing, Device::Gpu, &config),
            Err(Error::FolderNotFound(_))
        ));
        assert!(matches!(
            load_single(dir.path(), Device::Gpu, &config),
            Err(Error::ResultsFileNotFound(_))
        ));

        write(&dir.path().join("results_1.csv"), "model,test_name,seconds\n");
        assert!(matches!(
            load_single(dir.path(), Device::Gpu, &config),
            Err(Error::MissingColumn { device: Device::Gpu, .. })
        ));

        write(
            &dir.path().join("results_1.csv"),
            &format!("{HEADER}\nm1,t1,many,1,1,1,1\n"),
        );
        assert!(matches!(
            load_single(dir.path(), Device::Gpu, &config),
            Err(Error::Csv { .. })
        ));
    }
}
