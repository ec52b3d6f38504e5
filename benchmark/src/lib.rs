pub mod datafile;
pub mod generators;
pub mod harness;
pub mod schema;
pub mod util;

use std::{fs, path::PathBuf};

use schema::{DatasetInfo, Experiment, Parameter, ScanInfo};

pub fn fmt_open_err(e: impl ToString, path: &PathBuf) -> String {
    format!("Unable to open {}: {}", path_str(path), e.to_string())
}

pub fn path_str(path: &PathBuf) -> &str {
    path.to_str().unwrap_or("<unknown path>")
}

pub fn read_experiment(path: &PathBuf) -> Result<Experiment, String> {
    let experiment_toml = fs::read_to_string(path)
        .map_err(|e| fmt_open_err(e, path))?;

    toml::from_str(&experiment_toml)
        .map_err(|e| format!(
            "invalid toml file {}: {}",
            path_str(path), e
        ))
}

/// Values taken by the varied parameter, from its base value up to `to`.
pub fn xvalues(info: &DatasetInfo) -> impl Iterator<Item = u32> {
    let start = *param(&info.props, info.vary);
    (start..=info.to).step_by(info.step.max(1) as usize)
}

pub fn props_at_x(info: &DatasetInfo, x: u32) -> ScanInfo {
    let mut props = info.props.clone();
    *param_mut(&mut props, info.vary) = x;
    props
}

fn param(props: &ScanInfo, vary: Parameter) -> &u32 {
    match vary {
        Parameter::Length    => &props.length,
        Parameter::Position  => &props.position,
        Parameter::QueryBits => &props.query_bits,
    }
}

fn param_mut(props: &mut ScanInfo, vary: Parameter) -> &mut u32 {
    match vary {
        Parameter::Length    => &mut props.length,
        Parameter::Position  => &mut props.position,
        Parameter::QueryBits => &mut props.query_bits,
    }
}

/// Seed of repetition `i` at `x`, so every datafile is reproducible on its own.
pub fn datafile_seed(info: &DatasetInfo, x: u32, i: usize) -> u64 {
    info.seed
        .wrapping_mul(0x9e37_79b9_7f4a_7c15)
        .wrapping_add((x as u64) << 32)
        .wrapping_add(i as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Width;

    fn dataset(vary: Parameter) -> DatasetInfo {
        DatasetInfo {
            name: "test".to_string(),
            width: Width::U32,
            vary,
            to: 12,
            step: 4,
            gen_count: 1,
            seed: 7,
            props: ScanInfo {
                length: 4,
                position: 5000,
                hit: true,
                query_bits: 2,
            },
        }
    }

    #[test]
    fn xvalues_start_at_base() {
        let xs: Vec<u32> = xvalues(&dataset(Parameter::Length)).collect();
        assert_eq!(xs, vec![4, 8, 12]);

        let xs: Vec<u32> = xvalues(&dataset(Parameter::QueryBits)).collect();
        assert_eq!(xs, vec![2, 6, 10]);
    }

    #[test]
    fn props_vary_one_parameter() {
        let info = dataset(Parameter::Position);
        let props = props_at_x(&info, 100);
        assert_eq!(props.position, 100);
        assert_eq!(props.length, info.props.length);
    }

    #[test]
    fn seeds_differ_per_datafile() {
        let info = dataset(Parameter::Length);
        assert_ne!(datafile_seed(&info, 4, 0), datafile_seed(&info, 4, 1));
        assert_ne!(datafile_seed(&info, 4, 0), datafile_seed(&info, 8, 0));
    }
}
