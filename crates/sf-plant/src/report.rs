//! Solving plants and summarizing the results.

use crate::error::PlantResult;
use crate::plants::Plant;
use crate::config::PlantKind;
use rayon::prelude::*;
use sf_core::units::{j, k, kg, Energy, Mass};
use sf_solver::{solve, SolverConfig};
use sf_thermo::SpeciesTable;
use tracing::info;

/// One boundary product flow.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSummary {
    pub name: String,
    pub mass: Mass,
    pub temp_kelvin: f64,
}

/// Mass and electricity summary of one solved plant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantReport {
    pub plant: String,
    pub kind: PlantKind,
    pub products: Vec<FlowSummary>,
    /// Per-device electricity, devices with zero draw omitted.
    pub electricity: Vec<(String, Energy)>,
    pub total_electricity: Energy,
    pub metal_mass: Mass,
    pub iterations: usize,
}

impl PlantReport {
    /// Specific electricity in kWh per tonne of tapped metal.
    pub fn specific_electricity_kwh_per_tonne(&self) -> Option<f64> {
        if self.metal_mass.value <= 0.0 {
            return None;
        }
        let kwh = self.total_electricity.value / 3.6e6;
        Some(kwh / (self.metal_mass.value / 1000.0))
    }
}

impl Plant {
    /// Solve the flowsheet and summarize boundary flows and electricity.
    pub fn evaluate(&self, table: &SpeciesTable) -> PlantResult<PlantReport> {
        // Hydrogen loops with high recycle fractions converge slowly under
        // direct substitution, so the budget is generous.
        let config = SolverConfig {
            max_iterations: 3000,
            initial_temp: k(298.15),
            ..SolverConfig::default()
        };
        let solution = solve(&self.flowsheet, table, &config)?;

        let mut products = Vec::new();
        let mut metal_mass = kg(0.0);
        for stream_id in self.flowsheet.products() {
            let edge = self.flowsheet.stream(stream_id);
            let state = solution.stream(stream_id);
            let mass = kg(state.total_mass_kg()?);
            if edge.name == "metal" {
                metal_mass = mass;
            }
            products.push(FlowSummary {
                name: edge.name.clone(),
                mass,
                temp_kelvin: state.temp.value,
            });
        }

        let mut electricity = Vec::new();
        let mut total_j = 0.0;
        for duty in solution.duties() {
            total_j += duty.electricity_j;
            if duty.electricity_j > 0.0 {
                electricity.push((duty.name.clone(), j(duty.electricity_j)));
            }
        }

        info!(
            plant = %self.name,
            metal_kg = metal_mass.value,
            electricity_gj = total_j / 1e9,
            iterations = solution.iterations,
            "plant solved"
        );

        Ok(PlantReport {
            plant: self.name.clone(),
            kind: self.kind,
            products,
            electricity,
            total_electricity: j(total_j),
            metal_mass,
            iterations: solution.iterations,
        })
    }
}

/// Evaluate a batch of plants in parallel, preserving input order.
pub fn evaluate_all(plants: &[Plant], table: &SpeciesTable) -> Vec<PlantResult<PlantReport>> {
    plants
        .par_iter()
        .map(|plant| plant.evaluate(table))
        .collect()
}
