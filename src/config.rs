
use std::io::{BufRead, Write};
use toml::map::Map;

use crate::utils::log::{log_msg, FAIL};

pub const DEFAULT_RMSD_THRESHOLD: f64 = 5.0;
pub const DEFAULT_ANGLE_THRESHOLD: f64 = 0.087; // ~5 degrees
pub const DEFAULT_MAX_ORDER: usize = 60;

/// Thresholds and switches for the symmetry search.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryParameters {
    /// Acceptance threshold for subunit-center and trace RMSD.
    pub rmsd_threshold: f64,
    /// Tolerance around 180 degrees for the two-subunit solver.
    pub angle_threshold: f64,
    /// Ignore sequence-cluster ids when validating permutations.
    pub pseudo_symmetry: bool,
    /// Cap on folds searched and on the accepted group size.
    pub max_order: usize,
    /// Icosahedral subdivision frequency of the axis-sampling grid.
    pub sphere_frequency: usize,
}

impl SymmetryParameters {
    pub fn new(
        rmsd_threshold: f64, angle_threshold: f64, pseudo_symmetry: bool,
        max_order: usize, sphere_frequency: usize,
    ) -> Self {
        Self {
            rmsd_threshold,
            angle_threshold,
            pseudo_symmetry,
            max_order,
            sphere_frequency,
        }
    }

    pub fn from_toml(toml: &toml::Value) -> Self {
        let rmsd_threshold = toml["rmsd_threshold"].as_float().unwrap();
        let angle_threshold = toml["angle_threshold"].as_float().unwrap();
        let pseudo_symmetry = toml["pseudo_symmetry"].as_bool().unwrap();
        let max_order = toml["max_order"].as_integer().unwrap() as usize;
        let sphere_frequency = toml["sphere_frequency"].as_integer().unwrap() as usize;
        Self {
            rmsd_threshold,
            angle_threshold,
            pseudo_symmetry,
            max_order,
            sphere_frequency,
        }
    }

    pub fn to_toml(&self) -> toml::Value {
        let mut map = Map::new();
        map.insert("rmsd_threshold".to_string(), toml::Value::Float(self.rmsd_threshold));
        map.insert("angle_threshold".to_string(), toml::Value::Float(self.angle_threshold));
        map.insert("pseudo_symmetry".to_string(), toml::Value::Boolean(self.pseudo_symmetry));
        map.insert("max_order".to_string(), toml::Value::Integer(self.max_order as i64));
        map.insert("sphere_frequency".to_string(), toml::Value::Integer(self.sphere_frequency as i64));
        toml::Value::Table(map)
    }
}

impl Default for SymmetryParameters {
    fn default() -> Self {
        Self {
            rmsd_threshold: DEFAULT_RMSD_THRESHOLD,
            angle_threshold: DEFAULT_ANGLE_THRESHOLD,
            pseudo_symmetry: false,
            max_order: DEFAULT_MAX_ORDER,
            sphere_frequency: crate::symmetry::axes::DEFAULT_SPHERE_FREQUENCY,
        }
    }
}

pub fn write_parameters_to_file(path: &str, parameters: &SymmetryParameters) {
    let mut file = std::fs::File::create(path).expect(
        &log_msg(FAIL, &format!("Unable to create parameter file: {}", path))
    );
    let toml = parameters.to_toml();
    file.write_all(toml::to_string(&toml).unwrap().as_bytes()).unwrap();
}

pub fn read_parameters_from_file(path: &str) -> SymmetryParameters {
    let file = std::fs::File::open(path).expect(
        &log_msg(FAIL, &format!("Parameter file not found: {}", path))
    );
    let reader = std::io::BufReader::new(file);
    let toml = toml::from_str(
        &reader.lines().map(|x| format!("{}\n", x.unwrap())).collect::<String>()
    ).unwrap();
    SymmetryParameters::from_toml(&toml)
}
