use benchmark::{
    datafile, datafile_seed, fmt_open_err, generators, path_str, props_at_x, read_experiment,
    schema::*,
    util::Byteable,
};
use clap::Parser;
use colored::*;
use indicatif::ParallelProgressIterator;
use rand::{distributions::Standard, prelude::Distribution};
use rayon::prelude::*;
use std::{fs, io::{self, Write}, path::PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(default_value = "experiment.toml")]
    experiment: PathBuf,
    #[arg(default_value = "datasets/")]
    datasets: PathBuf,
    #[arg(long, action)]
    clean: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = if cli.clean {
        cli.clean().map_err(|e| e.to_string())
    }
    else {
        cli.generate()
    };

    if let Err(err) = result {
        println!("{}", err.red().bold());
    }
    else {
        println!("{}", "Done".green().bold());
    }
}

impl Cli {
    fn clean(&self) -> io::Result<()> {
        match fs::remove_dir_all(&self.datasets) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    fn generate(&self) -> Result<(), String> {
        let experiments = read_experiment(&self.experiment)?;

        for dataset in &experiments.dataset {
            maybe_generate_dataset(&self.datasets, dataset)?;
        }
        Ok(())
    }
}

fn maybe_generate_dataset(datasets: &PathBuf, info: &DatasetInfo) -> Result<(), String> {
    let dataset_path = datasets.join(&info.name);
    let info_path = datasets.join(info.name.clone() + ".json");

    // Check info file
    if let Ok(info_file) = fs::File::open(&info_path) {
        let existing_info: DatasetInfo =
            serde_json::from_reader(info_file)
            .map_err(|e| format!(
                "invalid json file {}: {}",
                path_str(&info_path), e.to_string()
            ))?;

        if existing_info == *info {
            println!("{} {}", "Skipping".bold(), info.name);
            return Ok(());
        }
        else {
            println!("{} {}", "Rebuilding".green().bold(), info.name);
        }
    }
    else {
        println!("{} {}", "Building".green().bold(), info.name);
    }

    match info.width {
        Width::U16 => generate_dataset::<u16>(info, &dataset_path)?,
        Width::U32 => generate_dataset::<u32>(info, &dataset_path)?,
    }

    // Write new info file
    let info_file = fs::File::options()
        .write(true)
        .truncate(true)
        .create(true)
        .open(&info_path)
        .map_err(|e| fmt_open_err(e, &info_path))?;

    serde_json::to_writer(info_file, info)
        .map_err(|e| e.to_string())?;

    Ok(())
}

fn generate_dataset<T>(info: &DatasetInfo, path: &PathBuf) -> Result<(), String>
where
    T: Byteable,
    Standard: Distribution<T>,
{
    let _ = fs::remove_dir_all(path);

    for x in benchmark::xvalues(info) {
        let label = format!("[x: {:5}]", x);
        println!("{}", label.bold());

        let xdir = path.join(x.to_string());
        fs::create_dir_all(&xdir)
            .map_err(|e| format!(
                "failed to create directory {}:\n{}",
                path_str(&xdir), e.to_string()
            ))?;

        let props = props_at_x(info, x);
        (0..info.gen_count)
            .into_par_iter()
            .progress_count(info.gen_count as u64)
            .try_for_each(|i| {
                let input = generators::gen_scan::<T>(&props, datafile_seed(info, x, i));
                let input_path = xdir.join(i.to_string());

                let input_file = fs::File::options()
                    .write(true)
                    .truncate(true)
                    .create(true)
                    .open(&input_path)
                    .map_err(|e| fmt_open_err(e, &input_path))?;

                let mut writer = io::BufWriter::new(input_file);
                datafile::to_writer(&mut writer, &input)
                    .map_err(|e| e.to_string())
                    .and_then(|_| writer.flush().map_err(|e| e.to_string()))
                    .map_err(|e| format!(
                        "failed to write {}: {}",
                        path_str(&input_path), e
                    ))
            })?;
    }
    Ok(())
}
