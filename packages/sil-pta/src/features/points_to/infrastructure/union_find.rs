//! ECR store: union-find over equivalence class records
//!
//! Arena of records addressed by [`EcrId`] with:
//! - Path compression: iterative, O(α(n)) amortized `find`
//! - Union by rank: the smaller handle survives a tie
//! - Payload join on the survivor, driven by a work-list of pending pairs
//!
//! Only a representative's payload is meaningful. The record merged away has
//! its term reset to `Unknown` and its names moved to the survivor.
//!
//! # References
//! - Tarjan, R. E. "Efficiency of a Good But Not Linear Set Union Algorithm" (1975)
//! - Steensgaard, B. "Points-to Analysis in Almost Linear Time" (POPL 1996)

use crate::config::ConflictPolicy;
use crate::features::points_to::domain::{Conflict, EcrId, TypeTerm};
use std::collections::BTreeSet;
use std::mem;
use tracing::warn;

#[derive(Debug, Clone)]
struct EcrRecord {
    /// Parent pointer (self-loop = root)
    parent: EcrId,
    /// Rank (tree height upper bound) for union by rank
    rank: u8,
    term: TypeTerm,
    conflicted: bool,
    /// Qualified variable names mapped to this class
    names: BTreeSet<String>,
    /// Allocation sites whose cells live in this class
    alloc_sites: Vec<String>,
}

/// Term plus conflict marker, moved around as a unit during joins
#[derive(Debug)]
struct Payload {
    term: TypeTerm,
    conflicted: bool,
}

impl Payload {
    fn plain(term: TypeTerm) -> Self {
        Self {
            term,
            conflicted: false,
        }
    }

    fn conflicted() -> Self {
        Self {
            term: TypeTerm::Unknown,
            conflicted: true,
        }
    }
}

/// Operation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub union_operations: usize,
    pub find_operations: usize,
}

/// Union-find store of ECRs, owned by a single analysis run
#[derive(Debug, Clone)]
pub struct EcrStore {
    records: Vec<EcrRecord>,
    /// Number of disjoint classes
    set_count: usize,
    policy: ConflictPolicy,
    conflicts: Vec<Conflict>,
    stats: StoreStats,
}

impl Default for EcrStore {
    fn default() -> Self {
        Self::new(ConflictPolicy::default())
    }
}

impl EcrStore {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            records: Vec::new(),
            set_count: 0,
            policy,
            conflicts: Vec::new(),
            stats: StoreStats::default(),
        }
    }

    /// Create a singleton class holding `term`
    pub fn make_set(&mut self, term: TypeTerm) -> EcrId {
        let id = EcrId(self.records.len() as u32);
        self.records.push(EcrRecord {
            parent: id,
            rank: 0,
            term,
            conflicted: false,
            names: BTreeSet::new(),
            alloc_sites: Vec::new(),
        });
        self.set_count += 1;
        id
    }

    /// Find the representative of `x`, compressing the path behind it
    pub fn find(&mut self, x: EcrId) -> EcrId {
        self.stats.find_operations += 1;

        let root = self.find_readonly(x);

        let mut current = x;
        while current != root {
            let next = self.records[current.index()].parent;
            self.records[current.index()].parent = root;
            current = next;
        }
        root
    }

    /// Find without path compression (for read-only queries)
    pub fn find_readonly(&self, x: EcrId) -> EcrId {
        let mut current = x;
        while self.records[current.index()].parent != current {
            current = self.records[current.index()].parent;
        }
        current
    }

    /// Merge the classes of `a` and `b`, joining their payloads
    ///
    /// Nested unions requested by the join are queued and processed here
    /// until none remain. Returns the representative of the merged class.
    pub fn union(&mut self, a: EcrId, b: EcrId) -> EcrId {
        let mut pending = vec![(a, b)];
        while let Some((x, y)) = pending.pop() {
            self.merge(x, y, &mut pending);
        }
        self.find(a)
    }

    fn merge(&mut self, a: EcrId, b: EcrId, pending: &mut Vec<(EcrId, EcrId)>) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        self.stats.union_operations += 1;

        let (root, child) = self.link(ra, rb);

        let first = self.take_payload(ra);
        let second = self.take_payload(rb);
        let joined = self.join(root, ra, rb, first, second, pending);

        let child_rec = &mut self.records[child.index()];
        let names = mem::take(&mut child_rec.names);
        let sites = mem::take(&mut child_rec.alloc_sites);

        let root_rec = &mut self.records[root.index()];
        root_rec.names.extend(names);
        root_rec.alloc_sites.extend(sites);
        root_rec.term = joined.term;
        root_rec.conflicted = joined.conflicted;

        self.set_count -= 1;
    }

    /// Attach the lower-rank root under the other; returns (root, child)
    fn link(&mut self, ra: EcrId, rb: EcrId) -> (EcrId, EcrId) {
        let rank_a = self.records[ra.index()].rank;
        let rank_b = self.records[rb.index()].rank;

        let (root, child) = if rank_a > rank_b || (rank_a == rank_b && ra < rb) {
            (ra, rb)
        } else {
            (rb, ra)
        };

        self.records[child.index()].parent = root;
        if rank_a == rank_b {
            self.records[root.index()].rank += 1;
        }
        (root, child)
    }

    fn take_payload(&mut self, id: EcrId) -> Payload {
        let rec = &mut self.records[id.index()];
        Payload {
            term: mem::take(&mut rec.term),
            conflicted: mem::replace(&mut rec.conflicted, false),
        }
    }

    /// Join two payloads; `first` belongs to the class named first by the caller
    fn join(
        &mut self,
        root: EcrId,
        ra: EcrId,
        rb: EcrId,
        first: Payload,
        second: Payload,
        pending: &mut Vec<(EcrId, EcrId)>,
    ) -> Payload {
        if first.conflicted || second.conflicted {
            collapse_into(root, &first.term, pending);
            collapse_into(root, &second.term, pending);
            return Payload::conflicted();
        }

        match (first.term, second.term) {
            (TypeTerm::Unknown, term) | (term, TypeTerm::Unknown) => Payload::plain(term),
            (TypeTerm::Base, TypeTerm::Base) => Payload::plain(TypeTerm::Base),
            (TypeTerm::Ref(r1), TypeTerm::Ref(r2)) => {
                pending.push((r1, r2));
                Payload::plain(TypeTerm::Ref(r1))
            }
            (
                TypeTerm::Lambda {
                    params: p1,
                    ret: r1,
                },
                TypeTerm::Lambda {
                    params: p2,
                    ret: r2,
                },
            ) if p1.len() == p2.len() => {
                pending.extend(p1.iter().copied().zip(p2.iter().copied()));
                pending.push((r1, r2));
                Payload::plain(TypeTerm::Lambda {
                    params: p1,
                    ret: r1,
                })
            }
            (left, right) => {
                let names = self.merged_names(ra, rb);
                let conflict = match (&left, &right) {
                    (TypeTerm::Lambda { params: p1, .. }, TypeTerm::Lambda { params: p2, .. }) => {
                        Conflict::ArityMismatch {
                            ecr: root,
                            names,
                            expected: p1.len(),
                            found: p2.len(),
                        }
                    }
                    _ => Conflict::TypeConflict {
                        ecr: root,
                        names,
                        left: left.shape(),
                        right: right.shape(),
                    },
                };
                self.record_conflict(conflict);

                match self.policy {
                    ConflictPolicy::Downgrade => {
                        collapse_into(root, &left, pending);
                        collapse_into(root, &right, pending);
                        Payload::conflicted()
                    }
                    ConflictPolicy::KeepFirst => Payload::plain(left),
                }
            }
        }
    }

    /// Record a clash found by the store or by the engine
    pub fn record_conflict(&mut self, conflict: Conflict) {
        warn!(ecr = %conflict.ecr(), policy = %self.policy, "{}", conflict);
        self.conflicts.push(conflict);
    }

    /// Sorted union of the names of the given classes
    pub fn class_names(&self, ids: &[EcrId]) -> Vec<String> {
        let mut names = BTreeSet::new();
        for &id in ids {
            let root = self.find_readonly(id);
            names.extend(self.records[root.index()].names.iter().cloned());
        }
        names.into_iter().collect()
    }

    /// Names of two roots mid-merge; the child's names have not moved yet
    fn merged_names(&self, ra: EcrId, rb: EcrId) -> Vec<String> {
        self.records[ra.index()]
            .names
            .union(&self.records[rb.index()].names)
            .cloned()
            .collect()
    }

    /// Term of the class containing `x`
    pub fn term(&self, x: EcrId) -> &TypeTerm {
        &self.records[self.find_readonly(x).index()].term
    }

    /// Overwrite the term of the class containing `x`
    pub fn set_term(&mut self, x: EcrId, term: TypeTerm) {
        let root = self.find(x);
        self.records[root.index()].term = term;
    }

    pub fn is_conflicted(&self, x: EcrId) -> bool {
        self.records[self.find_readonly(x).index()].conflicted
    }

    pub fn add_name(&mut self, x: EcrId, name: impl Into<String>) {
        let root = self.find(x);
        self.records[root.index()].names.insert(name.into());
    }

    pub fn add_alloc_site(&mut self, x: EcrId, site: impl Into<String>) {
        let root = self.find(x);
        self.records[root.index()].alloc_sites.push(site.into());
    }

    pub fn names(&self, x: EcrId) -> impl Iterator<Item = &str> {
        self.records[self.find_readonly(x).index()]
            .names
            .iter()
            .map(String::as_str)
    }

    pub fn alloc_sites(&self, x: EcrId) -> &[String] {
        &self.records[self.find_readonly(x).index()].alloc_sites
    }

    /// Check connectivity without modifying structure
    pub fn connected_readonly(&self, x: EcrId, y: EcrId) -> bool {
        self.find_readonly(x) == self.find_readonly(y)
    }

    /// All current representatives
    pub fn roots(&self) -> Vec<EcrId> {
        self.records
            .iter()
            .enumerate()
            .filter(|(i, rec)| rec.parent.index() == *i)
            .map(|(i, _)| EcrId(i as u32))
            .collect()
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub fn stats(&self) -> StoreStats {
        self.stats
    }

    /// Number of disjoint classes
    #[inline]
    pub fn count(&self) -> usize {
        self.set_count
    }

    /// Total number of ECR records ever created
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Queue every class `term` refers to for merging into `root`
fn collapse_into(root: EcrId, term: &TypeTerm, pending: &mut Vec<(EcrId, EcrId)>) {
    pending.extend(term.targets().into_iter().map(|target| (root, target)));
}
