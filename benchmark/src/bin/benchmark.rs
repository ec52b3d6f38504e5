use std::{
    fs::{self, File},
    collections::{HashMap, HashSet},
    io::BufReader,
    path::PathBuf,
    time::Duration,
};
use benchmark::{
    fmt_open_err, path_str, read_experiment,
    schema::*, datafile, harness,
    util::Byteable,
};
use clap::Parser;
use colored::*;
use supset::{Backend, SupersetScanner};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(default_value = "experiment.toml", long)]
    experiment: PathBuf,
    #[arg(default_value = "datasets/", long)]
    datasets: PathBuf,
    #[arg(default_value = "results.json", long)]
    out: PathBuf,
    // Ignore --bench provided by cargo.
    #[arg(long, action)]
    bench: bool,
    experiments: Vec<String>,
}

const TARGET_WARMUP: Duration = Duration::from_millis(1000);

fn main() {
    let cli = Cli::parse();

    if cfg!(debug_assertions) {
        println!("{}", "warning: running in debug mode".yellow().bold());
    }

    if let Err(e) = bench_from_files(&cli) {
        let msg = format!("error: {}", e);
        println!("{}", msg.red().bold());
    }
}

fn bench_from_files(cli: &Cli) -> Result<(), String> {
    let experiment = read_experiment(&cli.experiment)?;

    let dataset_backends = gen_dataset_to_backends_map(cli, &experiment);

    if dataset_backends.is_empty() {
        return Err("no experiment matches found".to_string());
    }

    let results = run_experiments(cli, experiment, dataset_backends)?;

    write_results(results, &cli.out)?;

    Ok(())
}

type BackendSet = HashSet<BackendId>;
/// Map each dataset to backends which need to be run on it.
/// This saves us from running multiple dataset/backend pairs twice
/// if present in multiple experiments.
fn gen_dataset_to_backends_map(cli: &Cli, experiment: &Experiment)
    -> HashMap<DatasetId, BackendSet>
{
    let mut dataset_backends: HashMap<DatasetId, BackendSet> = HashMap::new();
    for e in &experiment.experiment {
        if cli.experiments.is_empty() || cli.experiments.contains(&e.name) {
            dataset_backends
                .entry(e.dataset.clone())
                .or_default()
                .extend(e.backends.iter().cloned());
        }
    }
    dataset_backends
}

fn run_experiments(
    cli: &Cli,
    experiment: Experiment,
    dataset_backends: HashMap<DatasetId, BackendSet>)
    -> Result<Results, String>
{
    let mut results =
        HashMap::<DatasetId, DatasetResults>::new();

    for dataset in &experiment.dataset {
        if let Some(backends) = dataset_backends.get(&dataset.name) {
            let backend_results = match dataset.width {
                Width::U16 => run_dataset_benchmarks::<u16>(cli, dataset, backends)?,
                Width::U32 => run_dataset_benchmarks::<u32>(cli, dataset, backends)?,
            };
            let dataset_results = DatasetResults {
                info: dataset.clone(),
                backends: backend_results,
            };
            results.insert(dataset.name.clone(), dataset_results);
        }
    }

    let experiments = if !cli.experiments.is_empty() {
        experiment.experiment
            .into_iter()
            .filter(|e| cli.experiments.contains(&e.name))
            .collect()
    } else {
        experiment.experiment
    };

    Ok(Results {
        experiments,
        datasets: results,
    })
}

fn run_dataset_benchmarks<T: Byteable>(
    cli: &Cli,
    info: &DatasetInfo,
    backends: &BackendSet) -> Result<BackendResults, String>
{
    println!("{}", &info.name.green().bold());

    let dataset_dir = PathBuf::from(&cli.datasets)
        .join(&info.name);

    let mut scanners: Vec<(BackendId, SupersetScanner<T>)> = Vec::new();
    for name in backends {
        match Backend::from_name(name).and_then(SupersetScanner::<T>::with_backend) {
            Some(scanner) => scanners.push((name.clone(), scanner)),
            None => println!("{}", format!(
                "  backend {} unknown or unavailable for {}-bit elements",
                name, T::BITS).yellow()),
        }
    }

    let mut backend_results: BackendResults =
        scanners.iter().map(|(name, _)| (name.clone(), Vec::new())).collect();

    for x in benchmark::xvalues(info) {
        let xlabel = format!("[x: {:4}]", x);
        println!("{}", xlabel.bold());
        let xdir = dataset_dir.join(x.to_string());

        let inputs = read_inputs::<T>(&xdir)?;

        for (name, scanner) in &scanners {
            println!("  {}", name);

            let run = time_backend_on_x(x, *scanner, &inputs);
            if let Some(runs) = backend_results.get_mut(name) {
                runs.push(run);
            }
        }
    }
    Ok(backend_results)
}

fn read_inputs<T: Byteable>(xdir: &PathBuf) -> Result<Vec<datafile::ScanInput<T>>, String> {
    let paths: Result<Vec<PathBuf>, String> = fs::read_dir(xdir)
        .map_err(|e| fmt_open_err(e, xdir))?
        .map(|s| s
            .map_err(|e| format!(
                "unable to open directory entry in {}: {}",
                path_str(xdir), e.to_string()
            ))
            .map(|s| s.path())
        )
        .collect();

    paths?.iter()
        .map(|path| {
            let file = File::open(path)
                .map_err(|e| fmt_open_err(e, path))?;

            datafile::from_reader(BufReader::new(file))
                .map_err(|e| format!(
                    "invalid datafile {}: {}",
                    path_str(path),
                    e.to_string())
                )
        })
        .collect()
}

fn time_backend_on_x<T: Byteable>(
    x: u32,
    scanner: SupersetScanner<T>,
    inputs: &[datafile::ScanInput<T>]) -> ResultRun
{
    let mut result = ResultRun { x, times: Vec::with_capacity(inputs.len()) };

    let warmup = TARGET_WARMUP.div_f32(inputs.len().max(1) as f32);

    for input in inputs {
        match harness::time_scan(warmup, input, scanner) {
            Ok(elapsed) => result.times.push(elapsed.as_nanos() as u64),
            Err(e) => {
                println!("{}", format!("warn: {}", e).yellow());
                break;
            },
        }
    }

    result
}

fn write_results(results: Results, path: &PathBuf) -> Result<(), String> {
    let results_file = File::options()
        .write(true).create(true).truncate(true)
        .open(path)
        .map_err(|e| fmt_open_err(e, path))?;

    serde_json::to_writer(results_file, &results)
        .map_err(|e| format!(
            "failed to write {}: {}",
            path_str(path), e.to_string()
        ))?;

    Ok(())
}
