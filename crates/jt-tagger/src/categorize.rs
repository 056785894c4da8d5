//! Cone association and category partitioning of candidates.

use std::cmp::Ordering;
use std::f64::consts::PI;

use jt_core::{Candidate, Jet};

use crate::categories::Category;

/// Azimuthal difference wrapped into `(-pi, pi]`.
pub fn delta_phi(phi1: f64, phi2: f64) -> f64 {
    let mut dphi = phi1 - phi2;
    while dphi > PI {
        dphi -= 2.0 * PI;
    }
    while dphi <= -PI {
        dphi += 2.0 * PI;
    }
    dphi
}

/// Angular distance in the (eta, phi) plane.
pub fn delta_r(eta1: f64, phi1: f64, eta2: f64, phi2: f64) -> f64 {
    let deta = eta1 - eta2;
    let dphi = delta_phi(phi1, phi2);
    (deta * deta + dphi * dphi).sqrt()
}

/// Disjoint constituent lists for one jet, each sorted by descending pt.
///
/// The lists borrow from the event-wide candidate collection and are valid
/// for the duration of one event.
#[derive(Debug, Default)]
pub struct Constituents<'a> {
    /// Charged candidates with track details and no missing inner hits.
    pub charged: Vec<&'a Candidate>,
    /// Charged candidates with track details and missing inner hits.
    pub lost_tracks: Vec<&'a Candidate>,
    /// Neutral candidates.
    pub neutral: Vec<&'a Candidate>,
}

impl<'a> Constituents<'a> {
    /// The list for one category; the vertex category has no live source.
    pub fn list(&self, category: Category) -> &[&'a Candidate] {
        match category {
            Category::Charged => &self.charged,
            Category::LostTrack => &self.lost_tracks,
            Category::Neutral => &self.neutral,
            Category::Vertex => &[],
        }
    }

    /// Observed multiplicities for shape resolution.
    pub fn counts(&self) -> crate::shapes::CategoryCounts {
        crate::shapes::CategoryCounts {
            charged: self.charged.len(),
            lost_tracks: self.lost_tracks.len(),
            neutral: self.neutral.len(),
        }
    }
}

fn descending_pt(a: &&Candidate, b: &&Candidate) -> Ordering {
    b.pt.partial_cmp(&a.pt).unwrap_or(Ordering::Equal)
}

/// Partition the candidates within `cone_radius` of the jet axis.
///
/// Classification priority: charged candidates with track details and
/// missing inner hits become lost tracks, other charged candidates with
/// track details stay charged, neutral candidates stay neutral. Charged
/// candidates without track details are dropped from all lists. Each list
/// comes back stably sorted by descending pt. Pure function over read-only
/// inputs.
pub fn categorize<'a>(
    jet: &Jet,
    candidates: &'a [Candidate],
    cone_radius: f64,
) -> Constituents<'a> {
    let mut constituents = Constituents::default();

    for cand in candidates {
        if delta_r(jet.eta, jet.phi, cand.eta, cand.phi) > cone_radius {
            continue;
        }

        if cand.charge != 0 && cand.has_track_details {
            if cand.lost_inner_hits > 0 {
                constituents.lost_tracks.push(cand);
            } else {
                constituents.charged.push(cand);
            }
        } else if cand.charge == 0 {
            constituents.neutral.push(cand);
        }
        // charged without track details: deliberately dropped
    }

    constituents.charged.sort_by(descending_pt);
    constituents.lost_tracks.sort_by(descending_pt);
    constituents.neutral.sort_by(descending_pt);

    constituents
}
