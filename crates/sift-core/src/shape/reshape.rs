use crate::{
    config::ReshapeLimits,
    criterion::{Criterion, NamedCriteria},
    shape::{
        NamedShape, Reshaped, Shape,
        permute::{cartesian_product, permutation_count},
    },
    value::Scalar,
};
use sift_primitives::ValueKinds;
use std::{cmp::Ordering, collections::BTreeMap};

///
/// Partition
///
/// Working split of one criterion. The union of both sides always matches
/// exactly what the input matched.
///

#[derive(Debug, Default)]
struct Partition {
    matched: Vec<Criterion>,
    open: Vec<Criterion>,
}

impl Partition {
    fn matched(criterion: Criterion) -> Self {
        Self {
            matched: vec![criterion],
            open: Vec::new(),
        }
    }

    fn open(criterion: Criterion) -> Self {
        Self {
            matched: Vec::new(),
            open: vec![criterion],
        }
    }

    fn extend(&mut self, other: Self) {
        self.matched.extend(other.matched);
        self.open.extend(other.open);
    }

    fn push_open(&mut self, criterion: Criterion) {
        if criterion != Criterion::Never {
            self.open.push(criterion);
        }
    }
}

impl Shape {
    /// Split `criterion` into what this shape serves and what it leaves open,
    /// under the default limits.
    #[must_use]
    pub fn reshape(&self, criterion: &Criterion) -> Option<Reshaped> {
        self.reshape_with(criterion, &ReshapeLimits::default())
    }

    /// Split `criterion` under explicit limits. `None` when nothing matches.
    #[must_use]
    pub fn reshape_with(&self, criterion: &Criterion, limits: &ReshapeLimits) -> Option<Reshaped> {
        let partition = self.partition(criterion, limits);
        tracing::trace!(
            %criterion,
            matched = partition.matched.len(),
            open = partition.open.len(),
            "reshaped criterion"
        );

        if partition.matched.is_empty() {
            return None;
        }

        Some(Reshaped::new(partition.matched, partition.open))
    }

    fn partition(&self, criterion: &Criterion, limits: &ReshapeLimits) -> Partition {
        if *criterion == Criterion::Never {
            return Partition::default();
        }

        match (self, criterion) {
            (Self::Any, _) => Partition::matched(criterion.clone()),
            (Self::Or { shapes }, _) => partition_in_turn(shapes, criterion, limits),
            (_, Criterion::Or(branches)) => {
                let mut partition = Partition::default();
                for branch in branches.iter() {
                    partition.extend(self.partition(branch, limits));
                }
                partition
            }
            (Self::Value { kinds }, _) => partition_values(*kinds, criterion),
            (Self::Set { kinds }, _) => partition_set(*kinds, criterion),
            (Self::Range { kinds }, Criterion::InRange(range)) if kinds.contains(range.kind()) => {
                Partition::matched(criterion.clone())
            }
            (Self::Some { inner }, Criterion::Some(element)) => {
                let inner = inner.partition(element, limits);
                Partition {
                    matched: inner.matched.into_iter().map(Criterion::some).collect(),
                    open: inner.open.into_iter().map(Criterion::some).collect(),
                }
            }
            (Self::Named(shape), Criterion::Named(bag)) => shape.partition(bag, limits),
            _ => Partition::open(criterion.clone()),
        }
    }
}

// Each shape takes what it can from everything still open.
fn partition_in_turn(shapes: &[Shape], criterion: &Criterion, limits: &ReshapeLimits) -> Partition {
    let mut matched = Vec::new();
    let mut open = vec![criterion.clone()];

    for shape in shapes {
        let mut still_open = Vec::new();
        for candidate in &open {
            let partition = shape.partition(candidate, limits);
            matched.extend(partition.matched);
            still_open.extend(partition.open);
        }
        open = still_open;
    }

    Partition { matched, open }
}

// Split set members into accepted and rejected by kind.
fn split_members<'a>(
    kinds: ValueKinds,
    members: impl IntoIterator<Item = &'a Scalar>,
) -> (Vec<Scalar>, Vec<Scalar>) {
    members
        .into_iter()
        .cloned()
        .partition(|member| kinds.contains(member.kind()))
}

fn partition_values(kinds: ValueKinds, criterion: &Criterion) -> Partition {
    match criterion {
        Criterion::Is(value) if kinds.contains(value.kind()) => {
            Partition::matched(criterion.clone())
        }
        Criterion::InSet(values) => {
            let (accepted, rejected) = split_members(kinds, values.iter());
            let mut partition = Partition {
                matched: accepted.into_iter().map(Criterion::Is).collect(),
                open: Vec::new(),
            };
            partition.push_open(Criterion::in_set(rejected));
            partition
        }
        _ => Partition::open(criterion.clone()),
    }
}

fn partition_set(kinds: ValueKinds, criterion: &Criterion) -> Partition {
    match criterion {
        Criterion::Is(value) if kinds.contains(value.kind()) => {
            Partition::matched(Criterion::in_set([value.clone()]))
        }
        Criterion::InSet(values) => {
            let (accepted, rejected) = split_members(kinds, values.iter());
            let mut partition = Partition::default();
            if !accepted.is_empty() {
                partition.matched.push(Criterion::in_set(accepted));
            }
            partition.push_open(Criterion::in_set(rejected));
            partition
        }
        _ => Partition::open(criterion.clone()),
    }
}

impl NamedShape {
    fn partition(&self, bag: &NamedCriteria, limits: &ReshapeLimits) -> Partition {
        let whole = || Partition::open(Criterion::Named(bag.clone()));

        if let Some(undeclared) = bag.keys().find(|key| !self.fields.contains_key(*key)) {
            tracing::trace!(field = %undeclared, "bag carries an undeclared field");
            return whole();
        }
        if let Some((missing, _)) = self
            .fields
            .iter()
            .find(|(name, field)| field.required && !bag.contains_key(*name))
        {
            tracing::trace!(field = %missing, "bag lacks a required field");
            return whole();
        }

        // bag keys are a subset of the declared fields here
        let mut keys = Vec::with_capacity(bag.len());
        let mut fields = Vec::with_capacity(bag.len());
        for (key, criterion) in bag.iter() {
            let Some(field) = self.fields.get(key) else {
                return whole();
            };
            let partition = field.shape.partition(criterion, limits);
            if partition.matched.is_empty() {
                return whole();
            }
            keys.push(key.as_str());
            fields.push(partition);
        }

        let Some(count) = permutation_count(fields.iter().map(|field| field.matched.len())) else {
            tracing::warn!(fields = fields.len(), "bag permutation count overflows");
            return whole();
        };
        if count > limits.max_permutations {
            tracing::warn!(
                permutations = count,
                max_permutations = limits.max_permutations,
                "bag exceeds the permutation cap, leaving it open"
            );
            return whole();
        }

        let alternatives: Vec<Vec<Criterion>> =
            fields.iter().map(|field| field.matched.clone()).collect();
        let matched = cartesian_product(&alternatives)
            .into_iter()
            .map(|combination| build_bag(&keys, combination))
            .collect();

        // Residual i: leftovers at i, matched alternatives before i, the
        // original values after i.
        let mut open = Vec::new();
        for (index, field) in fields.iter().enumerate() {
            if field.open.is_empty() {
                continue;
            }

            let values = keys.iter().enumerate().map(|(position, key)| {
                match position.cmp(&index) {
                    Ordering::Less => Criterion::any_of(fields[position].matched.clone()),
                    Ordering::Equal => Criterion::any_of(field.open.clone()),
                    Ordering::Greater => bag.field(key).clone(),
                }
            });
            open.push(build_bag(&keys, values.collect()));
        }

        tracing::debug!(matched = count, open = open.len(), "reshaped bag");

        Partition { matched, open }
    }
}

fn build_bag(keys: &[&str], values: Vec<Criterion>) -> Criterion {
    let map: BTreeMap<String, Criterion> = keys
        .iter()
        .map(|key| (*key).to_string())
        .zip(values)
        .collect();

    Criterion::Named(NamedCriteria::from_map(map))
}
