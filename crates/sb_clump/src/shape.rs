//! Shape types and shape instances.
//!
//! A `ShapeType` is a node in a DAG of structural validators. It holds
//! its generalizations, a validation predicate, and a table of accessor
//! operators. Validating a shape validates all of its generalizations
//! first; a shape reachable along several paths (diamonds) is validated
//! only once per call.
//!
//! Accessor names form the closed `Operator` set, each with a typed
//! `Feature` result. A shape answers an operator if it, or one of its
//! generalizations, declares it.
//!
//! A `ShapeInstance` binds a clump to the shape it is believed to have
//! and re-confirms that belief before every operation.
//!

use std::fmt;
use std::ptr;
use ahash::AHashMap;
use ahash::AHashSet;
use log::trace;

use crate::Clump;
use crate::ShapeError;
use crate::shapes::LinearDouble;

/// Structural predicate of a shape; `Err` carries the reason.
pub type Validator = fn(&Clump) -> Result<(), String>;

/// Accessor implementation.
pub type OperatorFn = fn(&Clump) -> Result<Feature, ShapeError>;

/// Names of the accessors a shape may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    CountSequences,
    SequenceLengths,
    LinearDouble,
}

impl Operator {
    pub fn name(&self) -> &'static str {
        match self {
            Operator::CountSequences => "count_sequences",
            Operator::SequenceLengths => "sequence_lengths",
            Operator::LinearDouble => "linear_double",
        }
    }

    pub fn from_name(name: &str) -> Option<Operator> {
        [Operator::CountSequences, Operator::SequenceLengths, Operator::LinearDouble]
            .into_iter()
            .find(|op| op.name() == name)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Typed result of an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feature {
    Count(usize),
    Lengths(Vec<usize>),
    LinearDouble(LinearDouble),
}

pub struct ShapeType {
    name: &'static str,
    generalizations: Vec<&'static ShapeType>,
    validator: Validator,
    operators: AHashMap<Operator, OperatorFn>,
}

impl ShapeType {
    pub fn new(
        name: &'static str,
        generalizations: &[&'static ShapeType],
        validator: Validator,
    ) -> Self {
        ShapeType {
            name,
            generalizations: generalizations.to_vec(),
            validator,
            operators: AHashMap::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn generalizations(&self) -> &[&'static ShapeType] {
        &self.generalizations
    }

    /// Register an accessor. Each operator may be declared once per shape.
    pub fn declare_operator(&mut self, op: Operator, func: OperatorFn) -> Result<(), ShapeError> {
        if self.operators.contains_key(&op) {
            return Err(ShapeError::DuplicateOperatorDeclaration {
                shape: self.name,
                operator: op.name(),
            });
        }
        self.operators.insert(op, func);
        Ok(())
    }

    /// True if this shape itself declares `op`.
    pub fn declares(&self, op: Operator) -> bool {
        self.operators.contains_key(&op)
    }

    /// Validate all generalizations, then this shape's own predicate.
    pub fn validate(&self, clump: &Clump) -> Result<(), ShapeError> {
        let mut visited = AHashSet::default();
        self.validate_once(clump, &mut visited)
    }

    fn validate_once(
        &self,
        clump: &Clump,
        visited: &mut AHashSet<*const ShapeType>,
    ) -> Result<(), ShapeError> {
        if !visited.insert(self as *const ShapeType) {
            trace!("validate {}: already checked", self.name);
            return Ok(());
        }
        for g in &self.generalizations {
            g.validate_once(clump, visited)?;
        }
        trace!("validate {}", self.name);
        (self.validator)(clump).map_err(|reason| ShapeError::Validation { shape: self.name, reason })
    }

    /// Reflexive, transitive reachability along generalization edges.
    pub fn is_specialization(&self, other: &ShapeType) -> bool {
        ptr::eq(self, other) || self.generalizations.iter().any(|g| g.is_specialization(other))
    }

    /// Validate `clump` and bind it to this shape.
    pub fn examine(&'static self, clump: Clump) -> Result<ShapeInstance, ShapeError> {
        self.validate(&clump)?;
        Ok(ShapeInstance { shape: self, clump })
    }

    fn find_operator(&self, op: Operator) -> Option<OperatorFn> {
        self.operators
            .get(&op)
            .copied()
            .or_else(|| self.generalizations.iter().find_map(|g| g.find_operator(op)))
    }

    /// Run an accessor on a clump. Does not validate.
    pub fn call_operator(&self, op: Operator, clump: &Clump) -> Result<Feature, ShapeError> {
        let func = self.find_operator(op).ok_or_else(|| ShapeError::UnknownOperator {
            shape: self.name,
            operator: op.name().to_string(),
        })?;
        func(clump)
    }
}

impl PartialEq for ShapeType {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for ShapeType {}

impl fmt::Debug for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gens: Vec<_> = self.generalizations.iter().map(|g| g.name).collect();
        f.debug_struct("ShapeType")
            .field("name", &self.name)
            .field("generalizations", &gens)
            .finish()
    }
}

/// A clump together with the shape it is asserted to have.
#[derive(Debug, Clone)]
pub struct ShapeInstance {
    shape: &'static ShapeType,
    clump: Clump,
}

impl ShapeInstance {
    pub fn shape(&self) -> &'static ShapeType {
        self.shape
    }

    pub fn clump(&self) -> &Clump {
        &self.clump
    }

    pub fn into_clump(self) -> Clump {
        self.clump
    }

    /// Re-validate against `shape` and, on success, rebind to it. On
    /// failure the instance keeps its previous shape.
    pub fn cast(&mut self, shape: &'static ShapeType) -> Result<(), ShapeError> {
        shape.validate(&self.clump)?;
        self.shape = shape;
        Ok(())
    }

    /// Re-validate against the current shape.
    pub fn recast(&self) -> Result<(), ShapeError> {
        self.shape.validate(&self.clump)
    }

    pub fn is_shape(&self, shape: &ShapeType) -> bool {
        self.shape.is_specialization(shape)
    }

    /// Confirm the shape, then run an accessor.
    pub fn operate(&self, op: Operator) -> Result<Feature, ShapeError> {
        self.recast()?;
        self.shape.call_operator(op, &self.clump)
    }

    /// Like `operate`, with the accessor looked up by name.
    pub fn operate_by_name(&self, name: &str) -> Result<Feature, ShapeError> {
        let op = Operator::from_name(name).ok_or_else(|| ShapeError::UnknownOperator {
            shape: self.shape.name,
            operator: name.to_string(),
        })?;
        self.operate(op)
    }

    pub fn count_sequences(&self) -> Result<usize, ShapeError> {
        match self.operate(Operator::CountSequences)? {
            Feature::Count(n) => Ok(n),
            other => Err(self.mismatch(Operator::CountSequences, other)),
        }
    }

    pub fn sequence_lengths(&self) -> Result<Vec<usize>, ShapeError> {
        match self.operate(Operator::SequenceLengths)? {
            Feature::Lengths(v) => Ok(v),
            other => Err(self.mismatch(Operator::SequenceLengths, other)),
        }
    }

    pub fn linear_double(&self) -> Result<LinearDouble, ShapeError> {
        match self.operate(Operator::LinearDouble)? {
            Feature::LinearDouble(ld) => Ok(ld),
            other => Err(self.mismatch(Operator::LinearDouble, other)),
        }
    }

    fn mismatch(&self, op: Operator, got: Feature) -> ShapeError {
        ShapeError::FeatureMismatch {
            shape: self.shape.name,
            operator: op.name(),
            feature: format!("{got:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use once_cell::sync::Lazy;

    thread_local! {
        static TOP_CALLS: Cell<usize> = const { Cell::new(0) };
    }

    fn count_top(_: &Clump) -> Result<(), String> {
        TOP_CALLS.with(|c| c.set(c.get() + 1));
        Ok(())
    }

    fn never(_: &Clump) -> Result<(), String> {
        Err("never valid".to_string())
    }

    fn count(c: &Clump) -> Result<Feature, ShapeError> {
        Ok(Feature::Count(c.len()))
    }

    fn no_lengths(_: &Clump) -> Result<Feature, ShapeError> {
        Ok(Feature::Lengths(vec![]))
    }

    static TOP: Lazy<ShapeType> = Lazy::new(|| {
        let mut s = ShapeType::new("top", &[], count_top);
        s.declare_operator(Operator::CountSequences, count).unwrap();
        s
    });
    static LEFT: Lazy<ShapeType> = Lazy::new(|| ShapeType::new("left", &[&*TOP], |_| Ok(())));
    static RIGHT: Lazy<ShapeType> = Lazy::new(|| ShapeType::new("right", &[&*TOP], |_| Ok(())));
    static DIAMOND: Lazy<ShapeType> = Lazy::new(|| {
        let mut s = ShapeType::new("diamond", &[&*LEFT, &*RIGHT], |_| Ok(()));
        s.declare_operator(Operator::SequenceLengths, no_lengths).unwrap();
        s
    });
    static BROKEN: Lazy<ShapeType> = Lazy::new(|| ShapeType::new("broken", &[&*LEFT], never));

    #[test]
    fn test_diamond_validates_shared_ancestor_once() {
        let before = TOP_CALLS.with(|c| c.get());
        DIAMOND.validate(&Clump::new()).unwrap();
        assert_eq!(TOP_CALLS.with(|c| c.get()) - before, 1);
    }

    #[test]
    fn test_is_specialization() {
        assert!(DIAMOND.is_specialization(&DIAMOND));
        assert!(DIAMOND.is_specialization(&LEFT));
        assert!(DIAMOND.is_specialization(&TOP));
        assert!(!TOP.is_specialization(&DIAMOND));
        assert!(!LEFT.is_specialization(&RIGHT));
        assert_eq!(*LEFT, *LEFT);
        assert_ne!(*LEFT, *RIGHT);
    }

    #[test]
    fn test_duplicate_operator() {
        let mut s = ShapeType::new("fresh", &[], |_| Ok(()));
        s.declare_operator(Operator::CountSequences, count).unwrap();
        assert!(s.declares(Operator::CountSequences));
        assert_eq!(
            s.declare_operator(Operator::CountSequences, count).unwrap_err(),
            ShapeError::DuplicateOperatorDeclaration { shape: "fresh", operator: "count_sequences" }
        );
    }

    #[test]
    fn test_operator_lookup() {
        let inst = DIAMOND.examine(Clump::new()).unwrap();
        // Inherited from TOP through either branch.
        assert_eq!(inst.operate(Operator::CountSequences).unwrap(), Feature::Count(0));
        assert_eq!(inst.operate_by_name("count_sequences").unwrap(), Feature::Count(0));
        assert_eq!(inst.count_sequences().unwrap(), 0);
        assert!(matches!(
            inst.operate(Operator::LinearDouble),
            Err(ShapeError::UnknownOperator { shape: "diamond", .. })
        ));
        assert!(matches!(
            inst.operate_by_name("no_such_thing"),
            Err(ShapeError::UnknownOperator { .. })
        ));
        assert!(matches!(inst.sequence_lengths(), Ok(v) if v.is_empty()));
        assert_eq!(Operator::from_name("sequence_lengths"), Some(Operator::SequenceLengths));
    }

    #[test]
    fn test_feature_mismatch() {
        let mut s = ShapeType::new("liar", &[], |_| Ok(()));
        s.declare_operator(Operator::CountSequences, no_lengths).unwrap();
        let s: &'static ShapeType = Box::leak(Box::new(s));
        let inst = s.examine(Clump::new()).unwrap();
        assert!(matches!(inst.count_sequences(), Err(ShapeError::FeatureMismatch { .. })));
    }

    #[test]
    fn test_cast_and_failed_examine() {
        let err = BROKEN.examine(Clump::new()).unwrap_err();
        assert_eq!(err, ShapeError::Validation { shape: "broken", reason: "never valid".to_string() });

        let mut inst = LEFT.examine(Clump::new()).unwrap();
        assert!(inst.is_shape(&TOP));
        assert!(!inst.is_shape(&RIGHT));
        assert!(inst.cast(&BROKEN).is_err());
        assert_eq!(inst.shape(), &*LEFT);
        inst.cast(&RIGHT).unwrap();
        assert_eq!(inst.shape(), &*RIGHT);
        assert!(inst.recast().is_ok());
    }
}
