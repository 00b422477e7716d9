//! Binary operator recognition and vector-matching modifiers (§4.2
//! `VectorMatching`).

use crate::ast::{BinaryOp, Cardinality, VectorMatching};
use crate::error::ParseError;
use crate::parser::selector::token_as_label_name;
use crate::parser::Cursor;
use crate::token::{Keyword, TokenKind};

pub(crate) fn peek_binary_op(cursor: &Cursor) -> Option<BinaryOp> {
    Some(match cursor.peek() {
        TokenKind::Add => BinaryOp::Add,
        TokenKind::Sub => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::Caret => BinaryOp::Pow,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::Ne,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Le => BinaryOp::Le,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::Ge => BinaryOp::Ge,
        TokenKind::Keyword(Keyword::And) => BinaryOp::And,
        TokenKind::Keyword(Keyword::Or) => BinaryOp::Or,
        TokenKind::Keyword(Keyword::Unless) => BinaryOp::Unless,
        TokenKind::Keyword(Keyword::Atan2) => BinaryOp::Atan2,
        _ => return None,
    })
}

fn label_list(cursor: &mut Cursor) -> Result<Vec<String>, ParseError> {
    cursor.expect(TokenKind::LeftParen, "'('")?;
    let mut labels = Vec::new();
    if !cursor.check(&TokenKind::RightParen) {
        loop {
            let name = token_as_label_name(cursor.peek())
                .ok_or_else(|| ParseError::unexpected(cursor.peek(), "label name", cursor.peek_span()))?;
            cursor.bump();
            labels.push(name);
            if cursor.check(&TokenKind::Comma) {
                cursor.bump();
                if cursor.check(&TokenKind::RightParen) {
                    break;
                }
                continue;
            }
            break;
        }
    }
    cursor.expect(TokenKind::RightParen, "')'")?;
    Ok(labels)
}

/// `['bool'] ('on'|'ignoring') '(' LabelName* ')' [('group_left'|'group_right') GroupingLabels?] | 'bool'`
pub(crate) fn parse_vector_matching(cursor: &mut Cursor) -> Result<Option<VectorMatching>, ParseError> {
    let has_bool = cursor.check(&TokenKind::Keyword(Keyword::Bool));
    let has_on_ignoring = matches!(
        cursor.peek(),
        TokenKind::Keyword(Keyword::On) | TokenKind::Keyword(Keyword::Ignoring)
    );
    if !has_bool && !has_on_ignoring {
        return Ok(None);
    }

    let mut vm = VectorMatching::default();
    if has_bool {
        cursor.bump();
        vm.return_bool = true;
    }

    if matches!(
        cursor.peek(),
        TokenKind::Keyword(Keyword::On) | TokenKind::Keyword(Keyword::Ignoring)
    ) {
        vm.on = cursor.check(&TokenKind::Keyword(Keyword::On));
        cursor.bump();
        vm.matching_labels = label_list(cursor)?;

        if matches!(
            cursor.peek(),
            TokenKind::Keyword(Keyword::GroupLeft) | TokenKind::Keyword(Keyword::GroupRight)
        ) {
            vm.cardinality = if cursor.check(&TokenKind::Keyword(Keyword::GroupLeft)) {
                Cardinality::ManyToOne
            } else {
                Cardinality::OneToMany
            };
            cursor.bump();
            if cursor.check(&TokenKind::LeftParen) {
                vm.include_labels = label_list(cursor)?;
            }
        }
    }

    Ok(Some(vm))
}
