//! Declaration tree.
//!
//! A [`CompilationUnit`] is a flat, ordered list of declarations. Nesting is
//! expressed through each declaration's full path, not through tree shape.

use std::fmt::Write;

use serde::Serialize;

use crate::syntax::{SyntaxKind, SyntaxToken, TokenStream};

macro_rules! declaration_node {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            head: SyntaxToken,
            full_path: Vec<SyntaxToken>,
            name: String,
        }

        impl $name {
            /// The identifier naming the declared symbol.
            pub fn head(&self) -> &SyntaxToken {
                &self.head
            }

            /// Slash and name tokens leading to (and including) the head.
            pub fn full_path(&self) -> &[SyntaxToken] {
                &self.full_path
            }

            pub fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

declaration_node!(TypeDeclaration);
declaration_node!(VariableDeclaration);
declaration_node!(ProcDeclaration);
declaration_node!(VerbDeclaration);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclarationKind {
    Type,
    Variable,
    Proc,
    Verb,
}

impl DeclarationKind {
    /// The kind a `var`/`proc`/`verb` keyword switches to.
    pub fn from_keyword(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::VarKeyword => Some(Self::Variable),
            SyntaxKind::ProcKeyword => Some(Self::Proc),
            SyntaxKind::VerbKeyword => Some(Self::Verb),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Type(TypeDeclaration),
    Variable(VariableDeclaration),
    Proc(ProcDeclaration),
    Verb(VerbDeclaration),
}

impl Declaration {
    pub(crate) fn new(
        kind: DeclarationKind,
        head: SyntaxToken,
        full_path: Vec<SyntaxToken>,
        name: String,
    ) -> Self {
        match kind {
            DeclarationKind::Type => Self::Type(TypeDeclaration {
                head,
                full_path,
                name,
            }),
            DeclarationKind::Variable => Self::Variable(VariableDeclaration {
                head,
                full_path,
                name,
            }),
            DeclarationKind::Proc => Self::Proc(ProcDeclaration {
                head,
                full_path,
                name,
            }),
            DeclarationKind::Verb => Self::Verb(VerbDeclaration {
                head,
                full_path,
                name,
            }),
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Type(_) => DeclarationKind::Type,
            Declaration::Variable(_) => DeclarationKind::Variable,
            Declaration::Proc(_) => DeclarationKind::Proc,
            Declaration::Verb(_) => DeclarationKind::Verb,
        }
    }

    pub fn head(&self) -> &SyntaxToken {
        match self {
            Declaration::Type(n) => n.head(),
            Declaration::Variable(n) => n.head(),
            Declaration::Proc(n) => n.head(),
            Declaration::Verb(n) => n.head(),
        }
    }

    pub fn full_path(&self) -> &[SyntaxToken] {
        match self {
            Declaration::Type(n) => n.full_path(),
            Declaration::Variable(n) => n.full_path(),
            Declaration::Proc(n) => n.full_path(),
            Declaration::Verb(n) => n.full_path(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Declaration::Type(n) => n.name(),
            Declaration::Variable(n) => n.name(),
            Declaration::Proc(n) => n.name(),
            Declaration::Verb(n) => n.name(),
        }
    }

    /// The path as written, with a `/` between segments that came from
    /// different indentation levels: `/obj` + `var/x` renders as `/obj/var/x`.
    pub fn path_text(&self, stream: &TokenStream) -> String {
        let mut out = String::new();
        let mut previous: Option<SyntaxKind> = None;
        for token in self.full_path() {
            let slash = token.kind == SyntaxKind::Slash;
            if !slash && previous.is_some_and(|k| k != SyntaxKind::Slash) {
                out.push('/');
            }
            out.push_str(stream.text(token));
            previous = Some(token.kind);
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    declarations: Vec<Declaration>,
}

impl CompilationUnit {
    pub(crate) fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    /// One line per declaration: kind, name, path and position of the head.
    pub fn dump(&self, stream: &TokenStream) -> String {
        let mut out = String::new();
        for declaration in &self.declarations {
            writeln!(
                out,
                "{:?} {} {} @{}",
                declaration.kind(),
                declaration.name(),
                declaration.path_text(stream),
                declaration.head().position
            )
            .expect("String write never fails");
        }
        out
    }
}

impl<'a> IntoIterator for &'a CompilationUnit {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}
