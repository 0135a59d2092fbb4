use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::model::Report;

/// Reconstruct the full revision chain containing `target_id`: the root
/// ancestor followed by every re-inspection descended from it, ordered by
/// creation date.
///
/// Best-effort by design. An unknown `target_id` yields an empty chain; a
/// parent reference that points outside `all_reports` truncates the walk at
/// the last reachable report; a reference cycle terminates after at most
/// `all_reports.len()` hops. Corrupt data degrades the view, it never fails.
pub fn resolve_chain(all_reports: &[Report], target_id: &str) -> Vec<Report> {
    let Some(target) = all_reports.iter().find(|r| r.id == target_id) else {
        debug!("Report {} not found among {} reports", target_id, all_reports.len());
        return Vec::new();
    };

    let by_id: HashMap<&str, &Report> = all_reports.iter().map(|r| (r.id.as_str(), r)).collect();

    // Walk parent references up to the root. The hop cap guarantees
    // termination when the data contains a reference cycle; the node reached
    // when the cap is hit is treated as the root.
    let mut root = target;
    for _ in 0..all_reports.len() {
        match root.parent_report_id.as_deref() {
            Some(parent_id) => match by_id.get(parent_id) {
                Some(parent) => root = *parent,
                None => {
                    debug!("Parent {} of {} is missing; treating {} as root", parent_id, root.id, root.id);
                    break;
                }
            },
            None => break,
        }
    }

    // Level-order closure over the children relation, starting at the root.
    let mut children: HashMap<&str, Vec<&Report>> = HashMap::new();
    for report in all_reports {
        if let Some(parent_id) = report.parent_report_id.as_deref() {
            children.entry(parent_id).or_default().push(report);
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&Report> = VecDeque::new();
    let mut chain: Vec<Report> = Vec::new();

    visited.insert(root.id.as_str());
    queue.push_back(root);

    while let Some(report) = queue.pop_front() {
        chain.push(report.clone());
        if let Some(kids) = children.get(report.id.as_str()) {
            for kid in kids {
                if visited.insert(kid.id.as_str()) {
                    queue.push_back(kid);
                }
            }
        }
    }

    chain.sort_by(|a, b| a.created_date.cmp(&b.created_date));
    chain
}
