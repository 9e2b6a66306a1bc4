//! Model types for parsed trigger definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bit width selector for memory operands.
///
/// `Text` is a display-only marker used by record tooling; it has no
/// trigger-text encoding and is never produced by the operand reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemSize {
    Bit0,
    Bit1,
    Bit2,
    Bit3,
    Bit4,
    Bit5,
    Bit6,
    Bit7,
    NibbleLower,
    NibbleUpper,
    EightBit,
    SixteenBit,
    TwentyFourBit,
    ThirtyTwoBit,
    BitCount,
    Text,
}

impl MemSize {
    /// Number of bits read from memory for this size
    pub fn bits(&self) -> u32 {
        match self {
            MemSize::Bit0
            | MemSize::Bit1
            | MemSize::Bit2
            | MemSize::Bit3
            | MemSize::Bit4
            | MemSize::Bit5
            | MemSize::Bit6
            | MemSize::Bit7 => 1,
            MemSize::NibbleLower | MemSize::NibbleUpper => 4,
            MemSize::EightBit | MemSize::BitCount => 8,
            MemSize::SixteenBit => 16,
            MemSize::TwentyFourBit => 24,
            MemSize::ThirtyTwoBit => 32,
            MemSize::Text => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemSize::Bit0 => "Bit0",
            MemSize::Bit1 => "Bit1",
            MemSize::Bit2 => "Bit2",
            MemSize::Bit3 => "Bit3",
            MemSize::Bit4 => "Bit4",
            MemSize::Bit5 => "Bit5",
            MemSize::Bit6 => "Bit6",
            MemSize::Bit7 => "Bit7",
            MemSize::NibbleLower => "Lower4",
            MemSize::NibbleUpper => "Upper4",
            MemSize::EightBit => "8-bit",
            MemSize::SixteenBit => "16-bit",
            MemSize::TwentyFourBit => "24-bit",
            MemSize::ThirtyTwoBit => "32-bit",
            MemSize::BitCount => "BitCount",
            MemSize::Text => "Text",
        }
    }
}

impl fmt::Display for MemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What an operand refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperandKind {
    /// Live value at a memory address
    Address,
    /// Value at the address on the previous frame
    Delta,
    /// Value at the address before its last change
    Prior,
    /// BCD-decoded value at the address
    Bcd,
    /// Float-decoded value at the address
    Float,
    /// Literal numeric constant
    Literal,
}

impl OperandKind {
    pub fn is_memory_reference(&self) -> bool {
        !matches!(self, OperandKind::Literal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperandKind::Address => "Mem",
            OperandKind::Delta => "Delta",
            OperandKind::Prior => "Prior",
            OperandKind::Bcd => "BCD",
            OperandKind::Float => "Float",
            OperandKind::Literal => "Value",
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One side of a condition's comparison.
///
/// Invariant: `size` is present iff the operand is a memory reference.
/// The constructors maintain this; literal operands never carry a size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operand {
    kind: OperandKind,
    size: Option<MemSize>,
    value: u32,
}

impl Operand {
    /// Create a memory-reference operand of the given kind
    pub fn memory(kind: OperandKind, size: MemSize, address: u32) -> Self {
        debug_assert!(kind.is_memory_reference(), "literals carry no size");
        Self {
            kind,
            size: Some(size),
            value: address,
        }
    }

    pub fn address(size: MemSize, address: u32) -> Self {
        Self::memory(OperandKind::Address, size, address)
    }

    pub fn delta(size: MemSize, address: u32) -> Self {
        Self::memory(OperandKind::Delta, size, address)
    }

    pub fn prior(size: MemSize, address: u32) -> Self {
        Self::memory(OperandKind::Prior, size, address)
    }

    pub fn bcd(size: MemSize, address: u32) -> Self {
        Self::memory(OperandKind::Bcd, size, address)
    }

    pub fn float(size: MemSize, address: u32) -> Self {
        Self::memory(OperandKind::Float, size, address)
    }

    /// Create a literal constant operand
    pub fn literal(value: u32) -> Self {
        Self {
            kind: OperandKind::Literal,
            size: None,
            value,
        }
    }

    pub fn kind(&self) -> OperandKind {
        self.kind
    }

    pub fn size(&self) -> Option<MemSize> {
        self.size
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, OperandKind::Literal)
    }
}

/// Relational comparison between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    Equals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    NotEqualTo,
}

impl Comparator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Equals => "=",
            Comparator::LessThan => "<",
            Comparator::LessThanOrEqual => "<=",
            Comparator::GreaterThan => ">",
            Comparator::GreaterThanOrEqual => ">=",
            Comparator::NotEqualTo => "!=",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Combinator flag changing how a condition composes with its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionFlag {
    Standard,
    PauseIf,
    ResetIf,
    AddSource,
    SubSource,
    AddHits,
    SubHits,
    AndNext,
    OrNext,
    Measured,
    MeasuredIf,
    Trigger,
    AddAddress,
    ResetNextIf,
}

impl ConditionFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionFlag::Standard => "",
            ConditionFlag::PauseIf => "PauseIf",
            ConditionFlag::ResetIf => "ResetIf",
            ConditionFlag::AddSource => "AddSource",
            ConditionFlag::SubSource => "SubSource",
            ConditionFlag::AddHits => "AddHits",
            ConditionFlag::SubHits => "SubHits",
            ConditionFlag::AndNext => "AndNext",
            ConditionFlag::OrNext => "OrNext",
            ConditionFlag::Measured => "Measured",
            ConditionFlag::MeasuredIf => "MeasuredIf",
            ConditionFlag::Trigger => "Trigger",
            ConditionFlag::AddAddress => "AddAddress",
            ConditionFlag::ResetNextIf => "ResetNextIf",
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, ConditionFlag::Standard)
    }

    /// Flags that attach to the following condition and are therefore
    /// illegal on the last condition of a group.
    pub fn requires_following_condition(&self) -> bool {
        matches!(
            self,
            ConditionFlag::AddSource
                | ConditionFlag::SubSource
                | ConditionFlag::AddHits
                | ConditionFlag::SubHits
                | ConditionFlag::AndNext
                | ConditionFlag::OrNext
                | ConditionFlag::ResetNextIf
        )
    }

    /// Flags that open a hit chain whose final link must carry a hit target.
    pub fn starts_hit_chain(&self) -> bool {
        matches!(self, ConditionFlag::AddHits | ConditionFlag::SubHits)
    }

    /// Flags that keep an open hit chain running.
    pub fn continues_hit_chain(&self) -> bool {
        matches!(
            self,
            ConditionFlag::AddHits
                | ConditionFlag::SubHits
                | ConditionFlag::AndNext
                | ConditionFlag::OrNext
        )
    }
}

impl fmt::Display for ConditionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comparator plus right-hand operand.
///
/// Grouped into one struct so a condition either has a full comparison or
/// none at all; a comparator without a right operand is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comparison {
    op: Comparator,
    rhs: Operand,
}

impl Comparison {
    pub fn new(op: Comparator, rhs: Operand) -> Self {
        Self { op, rhs }
    }

    pub fn op(&self) -> Comparator {
        self.op
    }

    pub fn rhs(&self) -> &Operand {
        &self.rhs
    }
}

/// One relational test plus control metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    flag: ConditionFlag,
    lhs: Operand,
    comparison: Option<Comparison>,
    hit_target: Option<u32>,
}

impl Condition {
    pub fn new(
        flag: ConditionFlag,
        lhs: Operand,
        comparison: Option<Comparison>,
        hit_target: Option<u32>,
    ) -> Self {
        Self {
            flag,
            lhs,
            comparison,
            // a target of zero means hit-tracking disabled
            hit_target: hit_target.filter(|hits| *hits > 0),
        }
    }

    /// Standard condition comparing two operands, no hit target
    pub fn compare(lhs: Operand, op: Comparator, rhs: Operand) -> Self {
        Self::new(
            ConditionFlag::Standard,
            lhs,
            Some(Comparison::new(op, rhs)),
            None,
        )
    }

    pub fn with_flag(mut self, flag: ConditionFlag) -> Self {
        self.flag = flag;
        self
    }

    pub fn with_hit_target(mut self, hits: u32) -> Self {
        self.hit_target = if hits == 0 { None } else { Some(hits) };
        self
    }

    pub fn flag(&self) -> ConditionFlag {
        self.flag
    }

    pub fn lhs(&self) -> &Operand {
        &self.lhs
    }

    pub fn comparison(&self) -> Option<&Comparison> {
        self.comparison.as_ref()
    }

    pub fn comparator(&self) -> Option<Comparator> {
        self.comparison.as_ref().map(Comparison::op)
    }

    pub fn rhs(&self) -> Option<&Operand> {
        self.comparison.as_ref().map(Comparison::rhs)
    }

    pub fn hit_target(&self) -> Option<u32> {
        self.hit_target
    }
}

/// An ordered, order-significant sequence of conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionGroup {
    conditions: Vec<Condition>,
}

impl ConditionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_conditions(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

/// A full trigger: one Core group plus zero or more Alt groups.
///
/// Alt groups are indexed from 1 in validator messages; the order of the
/// `alts` vector is load-bearing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    core: ConditionGroup,
    alts: Vec<ConditionGroup>,
}

impl Trigger {
    pub fn new(core: ConditionGroup, alts: Vec<ConditionGroup>) -> Self {
        Self { core, alts }
    }

    /// The canonical "no trigger defined" value: empty Core, no Alts
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn core(&self) -> &ConditionGroup {
        &self.core
    }

    pub fn alts(&self) -> &[ConditionGroup] {
        &self.alts
    }

    pub fn group_count(&self) -> usize {
        1 + self.alts.len()
    }

    pub fn condition_count(&self) -> usize {
        self.core.len() + self.alts.iter().map(ConditionGroup::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.alts.is_empty()
    }
}
