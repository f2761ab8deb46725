//! Drug-likeness and pharmacokinetic rule evaluation.
//!
//! Pure functions over a [`MoleculeDescriptors`] value. Lipinski counts
//! violations with strict `>` while Ghose passes with `<=`; the two are kept
//! as separate checks even though they share thresholds.

use druglens_common::PharmacokineticPolicy;

use crate::descriptors::MoleculeDescriptors;
use crate::report::{
    Absorption, DrugLikeness, MoleculeReport, PassFail, Pharmacokinetics,
    PhysicochemicalProperties, YesNo,
};

pub const MAX_H_ACCEPTORS: u32 = 10;
pub const MAX_H_DONORS: u32 = 5;
pub const MAX_LOGP: f64 = 5.0;
pub const MAX_MOLECULAR_WEIGHT: f64 = 500.0;

pub const VEBER_MAX_ROTATABLE_BONDS: u32 = 10;
pub const VEBER_MAX_TPSA: f64 = 100.0;
pub const VEBER_MIN_ATOMS: u32 = 2;

pub const MUEGGE_MIN_LOGP: f64 = -2.0;
pub const MUEGGE_MAX_LOGP: f64 = 5.0;
pub const MUEGGE_MIN_MOLECULAR_WEIGHT: f64 = 200.0;
pub const MUEGGE_MAX_MOLECULAR_WEIGHT: f64 = 600.0;

/// Number of Rule-of-Five criteria exceeded (0..=4).
pub fn lipinski_violations(d: &MoleculeDescriptors) -> u8 {
    let mut violations = 0;
    if d.num_h_acceptors > MAX_H_ACCEPTORS { violations += 1; }
    if d.num_h_donors > MAX_H_DONORS { violations += 1; }
    if d.logp > MAX_LOGP { violations += 1; }
    if d.molecular_weight > MAX_MOLECULAR_WEIGHT { violations += 1; }
    violations
}

pub fn ghose_filter(d: &MoleculeDescriptors) -> bool {
    d.num_h_acceptors <= MAX_H_ACCEPTORS
        && d.num_h_donors <= MAX_H_DONORS
        && d.logp <= MAX_LOGP
        && d.molecular_weight <= MAX_MOLECULAR_WEIGHT
}

pub fn veber_rule(d: &MoleculeDescriptors) -> bool {
    d.num_rotatable_bonds <= VEBER_MAX_ROTATABLE_BONDS
        && d.tpsa <= VEBER_MAX_TPSA
        && d.num_atoms >= VEBER_MIN_ATOMS
}

/// Both logP and weight bounds are inclusive on each side.
pub fn muegge_rule(d: &MoleculeDescriptors) -> bool {
    d.num_h_acceptors <= MAX_H_ACCEPTORS
        && d.num_h_donors <= MAX_H_DONORS
        && (MUEGGE_MIN_LOGP..=MUEGGE_MAX_LOGP).contains(&d.logp)
        && (MUEGGE_MIN_MOLECULAR_WEIGHT..=MUEGGE_MAX_MOLECULAR_WEIGHT).contains(&d.molecular_weight)
}

pub fn hia_absorption(d: &MoleculeDescriptors, policy: &PharmacokineticPolicy) -> Absorption {
    if d.logp < policy.hia_max_logp { Absorption::High } else { Absorption::Low }
}

pub fn bbb_penetration(d: &MoleculeDescriptors, policy: &PharmacokineticPolicy) -> bool {
    d.logp < policy.bbb_max_logp && d.molecular_weight < policy.bbb_max_molecular_weight
}

/// Applies every rule to a descriptor set and assembles the report.
#[derive(Debug, Clone, Default)]
pub struct RuleEvaluator {
    policy: PharmacokineticPolicy,
}

impl RuleEvaluator {
    pub fn new(policy: PharmacokineticPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PharmacokineticPolicy {
        &self.policy
    }

    pub fn evaluate(&self, d: &MoleculeDescriptors) -> MoleculeReport {
        MoleculeReport {
            physicochemical_properties: PhysicochemicalProperties {
                molecular_weight: d.molecular_weight,
                logp: d.logp,
                tpsa: d.tpsa,
                num_rings: d.num_rings,
                num_rotatable_bonds: d.num_rotatable_bonds,
            },
            pharmacokinetics: Pharmacokinetics {
                hia_absorption: hia_absorption(d, &self.policy),
                bbb_penetration: YesNo::from(bbb_penetration(d, &self.policy)),
            },
            drug_likeness: DrugLikeness {
                lipinski_violations: lipinski_violations(d),
                ghose_filter: YesNo::from(ghose_filter(d)),
                veber_rule: PassFail::from(veber_rule(d)),
                muegge_rule_pass: YesNo::from(muegge_rule(d)),
                qed: d.qed,
            },
        }
    }
}
