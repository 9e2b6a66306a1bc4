//! Canonical trigger serializer
//!
//! The inverse of parsing: conditions render as flag prefix, left
//! operand, comparator and right operand, and hit-count suffix, joined
//! with `_` inside a group and `S` between groups. Any trigger the
//! parser produces round-trips structurally; so does any trigger built
//! by hand from model values.

use crate::grammar::{tables, Condition, ConditionGroup, Operand, OperandKind, Trigger};

/// Render a trigger to its canonical textual form.
pub fn serialize_trigger(trigger: &Trigger) -> String {
    let mut buffer = String::new();

    serialize_group_append(&mut buffer, trigger.core());
    for alt in trigger.alts() {
        buffer.push('S');
        serialize_group_append(&mut buffer, alt);
    }

    buffer
}

/// Render a single condition to its canonical textual form.
pub fn serialize_condition(condition: &Condition) -> String {
    let mut buffer = String::new();
    serialize_condition_append(&mut buffer, condition);
    buffer
}

fn serialize_group_append(buffer: &mut String, group: &ConditionGroup) {
    for (index, condition) in group.conditions().iter().enumerate() {
        if index > 0 {
            buffer.push('_');
        }
        serialize_condition_append(buffer, condition);
    }
}

fn serialize_condition_append(buffer: &mut String, condition: &Condition) {
    if let Some(letter) = tables::letter_for_flag(condition.flag()) {
        buffer.push(letter);
        buffer.push(':');
    }

    serialize_operand_append(buffer, condition.lhs());

    if let Some(comparison) = condition.comparison() {
        buffer.push_str(comparison.op().symbol());
        serialize_operand_append(buffer, comparison.rhs());
    }

    if let Some(hits) = condition.hit_target() {
        buffer.push_str(&format!(".{}.", hits));
    }
}

fn serialize_operand_append(buffer: &mut String, operand: &Operand) {
    if operand.kind() == OperandKind::Literal {
        buffer.push_str(&operand.value().to_string());
        return;
    }

    match operand.kind() {
        OperandKind::Delta => buffer.push('d'),
        OperandKind::Prior => buffer.push('p'),
        OperandKind::Bcd => buffer.push('b'),
        OperandKind::Float => buffer.push('f'),
        OperandKind::Address | OperandKind::Literal => {}
    }

    buffer.push_str("0x");
    if let Some(letter) = operand.size().and_then(tables::letter_for_size) {
        buffer.push(letter);
    }
    buffer.push_str(&format!("{:x}", operand.value()));
}
