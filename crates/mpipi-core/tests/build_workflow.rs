//! End-to-end builds of small systems through the public workflow API.

use mpipi::core::coords::{ChainSpec, CoordinateError, SpiralSpacing};
use mpipi::core::forcefield::bonded::BondKind;
use mpipi::core::forcefield::params::{NonbondedTable, TABLE_LEN};
use mpipi::core::models::builder::TopologyBuilder;
use mpipi::core::models::chain::ChainKind;
use mpipi::core::models::regions::{GlobularRegionMap, GlobularRegions};
use mpipi::core::models::structure::{AtomisticStructure, StructureResidue};
use mpipi::core::models::topology::Bond;
use mpipi::engine::config::{BuildConfig, BuildConfigBuilder};
use mpipi::engine::error::EngineError;
use mpipi::engine::progress::{Progress, ProgressReporter};
use mpipi::workflows::build::{PlacedChain, build_single_chain, compose_chains, run};
use nalgebra::{Point3, Vector3};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

fn uniform_table() -> Arc<NonbondedTable> {
    let mut values = vec![0.0; TABLE_LEN];
    values[..441].fill(0.8);
    values[441..882].fill(0.6);
    values[882..1323].fill(2.0);
    values[1323..].fill(0.05);
    Arc::new(NonbondedTable::from_values(values).unwrap())
}

fn line(count: usize, spacing: f64) -> Vec<Point3<f64>> {
    (0..count)
        .map(|i| Point3::new(i as f64 * spacing, 0.0, 0.0))
        .collect()
}

fn config() -> BuildConfig {
    BuildConfigBuilder::new()
        .temperature(280.0)
        .ionic_strength(150.0)
        .periodic(false)
        .remove_com_motion(false)
        .build()
        .unwrap()
}

#[test]
fn flexible_chain_of_ten_residues() {
    let mut builder = TopologyBuilder::new();
    builder
        .add_chain("A", ChainKind::Protein, "GGGGGGGGGG", &GlobularRegions::default())
        .unwrap();
    let mut topology = builder.build();
    let positions = line(10, 0.381);

    let system = run(
        &mut topology,
        &positions,
        &GlobularRegionMap::new(),
        uniform_table(),
        &config(),
        &ProgressReporter::new(),
    )
    .unwrap();

    assert_eq!(system.bonds.len(), 9);
    assert!(system.bonds.iter().all(|b| b.length == 0.381 && b.k == 8031.0));
    assert!(system.bonds.iter().all(|b| b.kind == BondKind::Backbone));

    assert_eq!(system.short_range.particles.len(), 10);
    assert!(system.short_range.particles.iter().all(|p| !p.rigid));
    for a in 0..10 {
        for b in 0..10 {
            assert_eq!(system.short_range.structural_factor(a, b), 1.0);
        }
    }
    assert_eq!(system.short_range.exclusions.len(), 9);
    assert_eq!(system.electrostatics.exclusions.len(), 9);
}

#[test]
fn fully_rigid_chain_of_ten_residues() {
    let all: Vec<usize> = (0..10).collect();
    let mut builder = TopologyBuilder::new();
    builder
        .add_chain("A", ChainKind::Protein, "GGGGGGGGGG", &GlobularRegions::new(all.clone()))
        .unwrap();
    let mut topology = builder.build();
    let regions = GlobularRegionMap::new().with_chain("A", all);

    let system = run(
        &mut topology,
        &line(10, 0.05),
        &regions,
        uniform_table(),
        &config(),
        &ProgressReporter::new(),
    )
    .unwrap();

    assert_eq!(system.bonds.len(), 45);
    assert!(system.bonds.iter().all(|b| b.kind == BondKind::ElasticNetwork));
    let unique: HashSet<Bond> = system.bonds.iter().map(|b| b.pair()).collect();
    assert_eq!(unique.len(), 45);
    assert!(system.bonds.iter().all(|b| b.i < b.j));

    for a in 0..10 {
        for b in 0..10 {
            assert_eq!(system.short_range.structural_factor(a, b), 0.7);
        }
    }
    assert_eq!(system.short_range.exclusions.len(), system.bonds.len());
    assert_eq!(topology.bonds().len(), 45);
}

#[test]
fn exclusions_equal_bonds_for_a_mixed_multi_chain_system() {
    let structure = AtomisticStructure::new(
        ["MET", "LYS", "VAL", "ALA", "GLY", "SER"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let angle = i as f64 * 0.9;
                StructureResidue::new(name).with_atom(
                    "CA",
                    Point3::new(0.3 * angle.cos(), 0.3 * angle.sin(), 0.1 * i as f64),
                )
            })
            .collect(),
    );
    let chains = vec![
        PlacedChain {
            spec: ChainSpec::Structured {
                id: "A".to_string(),
                sequence: "MKVAGS".to_string(),
                regions: GlobularRegions::new(vec![vec![0usize, 1, 2], vec![4, 5]]),
                structure,
            },
            offset: Vector3::zeros(),
        },
        PlacedChain {
            spec: ChainSpec::Synthetic {
                id: "B".to_string(),
                kind: ChainKind::Protein,
                sequence: "RRDDEEKK".to_string(),
            },
            offset: Vector3::new(5.0, 0.0, 0.0),
        },
        PlacedChain {
            spec: ChainSpec::Synthetic {
                id: "R".to_string(),
                kind: ChainKind::Rna,
                sequence: "UUUUU".to_string(),
            },
            offset: Vector3::new(-5.0, 0.0, 0.0),
        },
    ];

    let mut composed =
        compose_chains(&chains, &SpiralSpacing::default(), &ProgressReporter::new()).unwrap();
    assert_eq!(composed.topology.bead_count(), 19);
    assert_eq!(composed.positions.len(), 19);

    let system = run(
        &mut composed.topology,
        &composed.positions,
        &composed.regions,
        uniform_table(),
        &config(),
        &ProgressReporter::new(),
    )
    .unwrap();

    assert_eq!(system.short_range.exclusions.len(), system.bonds.len());
    assert_eq!(system.electrostatics.exclusions.len(), system.bonds.len());
    let rna_bonds: Vec<_> = system.bonds.iter().filter(|b| b.i >= 14).collect();
    assert_eq!(rna_bonds.len(), 4);
    assert!(rna_bonds.iter().all(|b| b.length == 0.5));
    assert!(system.short_range.particles[0].rigid);
    assert!(!system.short_range.particles[3].rigid);
    assert_eq!(system.particle_names[14], "rU");
}

#[test]
fn structure_with_different_sequence_is_rejected() {
    let structure = AtomisticStructure::new(vec![
        StructureResidue::new("MET").with_atom("CA", Point3::origin()),
        StructureResidue::new("GLY").with_atom("CA", Point3::new(0.38, 0.0, 0.0)),
    ]);
    let spec = ChainSpec::Structured {
        id: "A".to_string(),
        sequence: "MK".to_string(),
        regions: GlobularRegions::new(vec![0usize, 1]),
        structure,
    };

    let result = build_single_chain(
        &spec,
        uniform_table(),
        &BuildConfig::single_chain(),
        &ProgressReporter::new(),
    );
    assert!(matches!(
        result,
        Err(EngineError::Coordinates(CoordinateError::SequenceMismatch { .. }))
    ));
}

#[test]
fn single_chain_build_reports_chain_mass_and_progress() {
    let phases = Mutex::new(Vec::new());
    let reporter = ProgressReporter::with_callback(Box::new(|event| {
        if let Progress::PhaseStart { name } = event {
            phases.lock().unwrap().push(name);
        }
    }));
    let spec = ChainSpec::Synthetic {
        id: "A".to_string(),
        kind: ChainKind::Protein,
        sequence: "MGK".to_string(),
    };

    let (chain, system) =
        build_single_chain(&spec, uniform_table(), &BuildConfig::single_chain(), &reporter).unwrap();
    drop(reporter);

    assert!((system.total_mass() - (131.20 + 57.05 + 128.20)).abs() < 1e-9);
    assert_eq!(chain.topology.chain_mass("A"), Some(system.total_mass()));
    assert!(chain.topology.is_sealed());
    assert!(!system.periodic);
    assert_eq!(phases.into_inner().unwrap(), vec!["Preparation", "Assembly"]);
}

#[test]
fn mismatched_positions_are_rejected() {
    let mut builder = TopologyBuilder::new();
    builder
        .add_chain("A", ChainKind::Protein, "GGG", &GlobularRegions::default())
        .unwrap();
    let mut topology = builder.build();
    let result = run(
        &mut topology,
        &line(2, 0.381),
        &GlobularRegionMap::new(),
        uniform_table(),
        &config(),
        &ProgressReporter::new(),
    );
    assert!(matches!(
        result,
        Err(EngineError::PositionCountMismatch { beads: 3, positions: 2 })
    ));
}
