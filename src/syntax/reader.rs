//! Header reader for Java and Kotlin sources.
//!
//! Reads just enough of a file to build declaration models: the package
//! clause, imports, and every class-like header (top-level or nested) with its
//! annotations. Member bodies are skipped. Malformed input never fails; the
//! reader recovers whatever headers it can.
//!
//! Annotation and class-literal names are resolved in this order:
//! 1. a class declared in this file, searching enclosing classes outward
//! 2. an explicit import (or Kotlin `as` alias) of the first segment
//! 3. an already qualified name (dotted, lowercase first segment)
//! 4. the file's own package
//!
//! Star imports are recorded but never used for resolution.

use rustc_hash::FxHashSet;
use std::path::Path;

use super::declaration::Declaration;
use super::error::SyntaxError;
use super::java::{JavaAnnotation, JavaClass, JavaClassKind, JavaMemberValue};
use super::kotlin::{KotlinClass, KotlinClassKind, KtAnnotationEntry, KtExpression, KtValueArgument};
use super::lexer::{Token, TokenKind, significant_tokens};
use crate::base::{QualifiedName, SourceSyntax};

/// Modifiers that may precede a class keyword in either syntax.
const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "internal",
    "static",
    "final",
    "abstract",
    "sealed",
    "open",
    "data",
    "inner",
    "value",
    "inline",
    "strictfp",
    "expect",
    "actual",
    "external",
    "companion",
    "enum",
    "annotation",
];

/// Identifiers that end a body-less Kotlin class header.
const DECLARATION_STARTS: &[&str] = &["class", "interface", "object", "fun", "val", "var", "typealias"];

/// An import directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub path: String,
    pub alias: Option<String>,
    pub is_star: bool,
}

impl Import {
    /// The name this import binds in the file.
    pub fn bound_name(&self) -> Option<&str> {
        if self.is_star {
            return None;
        }
        self.alias
            .as_deref()
            .or_else(|| self.path.rsplit('.').next())
    }
}

/// Everything the reader recovered from one file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub syntax: SourceSyntax,
    pub package: String,
    pub imports: Vec<Import>,
    /// Class-like declarations, outer classes before their nested classes.
    pub declarations: Vec<Declaration>,
}

/// Read a `.java` or `.kt` file.
pub fn parse_file(path: &Path, text: &str) -> Result<ParsedFile, SyntaxError> {
    let syntax = SourceSyntax::from_path(path)
        .ok_or_else(|| SyntaxError::UnsupportedExtension(path.to_path_buf()))?;
    Ok(parse_source(text, syntax))
}

/// Read source text of a known syntax.
pub fn parse_source(text: &str, syntax: SourceSyntax) -> ParsedFile {
    let mut reader = HeaderReader::new(text, syntax);
    reader.read_file();

    let declarations = {
        let resolver = NameResolver::new(&reader.package, &reader.imports, &reader.classes);
        reader
            .classes
            .iter()
            .map(|class| resolver.lower(class, syntax))
            .collect()
    };

    ParsedFile {
        syntax,
        package: reader.package,
        imports: reader.imports,
        declarations,
    }
}

// ============================================================================
// RAW HEADERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListForm {
    Braces,
    Brackets,
    ArrayOf,
}

#[derive(Debug, Clone)]
enum RawValue {
    ClassRef(String),
    List(Vec<RawValue>, ListForm),
    Other(String),
}

#[derive(Debug, Clone)]
struct RawArgument {
    name: Option<String>,
    value: RawValue,
}

#[derive(Debug, Clone)]
struct RawAnnotation {
    name: String,
    arguments: Vec<RawArgument>,
}

#[derive(Debug, Clone)]
struct RawClass {
    /// Enclosing class names followed by this class's name.
    path: Vec<String>,
    kind: RawKind,
    annotations: Vec<RawAnnotation>,
}

// ============================================================================
// READER
// ============================================================================

struct HeaderReader<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    syntax: SourceSyntax,
    package: String,
    imports: Vec<Import>,
    classes: Vec<RawClass>,
}

impl<'a> HeaderReader<'a> {
    fn new(source: &'a str, syntax: SourceSyntax) -> Self {
        Self {
            source,
            tokens: significant_tokens(source),
            pos: 0,
            syntax,
            package: String::new(),
            imports: Vec::new(),
            classes: Vec::new(),
        }
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.pos + n)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn at_ident(&self, text: &str) -> bool {
        self.peek().is_some_and(|t| t.is_ident(text))
    }

    fn bump(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn at_value_end(&self) -> bool {
        match self.peek() {
            None => true,
            Some(t) => matches!(
                t.kind,
                TokenKind::Comma | TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket
            ),
        }
    }

    /// `Ident (. Ident)*`
    fn read_dotted_name(&mut self) -> Option<Vec<&'a str>> {
        let first = self.peek().filter(|t| t.kind == TokenKind::Ident)?.text;
        self.bump();
        let mut segments = vec![first];
        while self.at(TokenKind::Dot)
            && self
                .peek_nth(1)
                .is_some_and(|t| t.kind == TokenKind::Ident)
        {
            self.bump();
            if let Some(t) = self.peek() {
                segments.push(t.text);
            }
            self.bump();
        }
        Some(segments)
    }

    /// Skip a balanced `open ... close` group starting at the current token.
    fn skip_group(&mut self, open: TokenKind, close: TokenKind) {
        let mut depth = 0usize;
        while let Some(t) = self.peek() {
            let kind = t.kind;
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // File structure
    // ------------------------------------------------------------------------

    fn read_file(&mut self) {
        loop {
            if self.at_ident("package") {
                self.bump();
                if let Some(segments) = self.read_dotted_name() {
                    self.package = segments.join(".");
                }
                self.eat(TokenKind::Semicolon);
            } else if self.at_ident("import") {
                self.read_import();
            } else if self.at(TokenKind::At)
                && self.peek_nth(1).is_some_and(|t| t.is_ident("file"))
                && self.peek_nth(2).is_some_and(|t| t.kind == TokenKind::Colon)
            {
                // Kotlin file annotations precede the package clause.
                self.read_annotation();
            } else {
                break;
            }
        }
        self.read_members(&[], false);
    }

    fn read_import(&mut self) {
        self.bump();
        if self.at_ident("static") {
            self.bump();
        }
        let Some(segments) = self.read_dotted_name() else {
            return;
        };
        let mut import = Import {
            path: segments.join("."),
            alias: None,
            is_star: false,
        };
        if self.at(TokenKind::Dot) && self.peek_nth(1).is_some_and(|t| t.kind == TokenKind::Star) {
            self.bump();
            self.bump();
            import.is_star = true;
        }
        if self.at_ident("as") {
            self.bump();
            if let Some(t) = self.peek().filter(|t| t.kind == TokenKind::Ident) {
                import.alias = Some(t.text.to_string());
                self.bump();
            }
        }
        self.eat(TokenKind::Semicolon);
        self.imports.push(import);
    }

    /// Read class headers until the closing brace of the enclosing body (or
    /// end of input at top level).
    fn read_members(&mut self, enclosing: &[String], in_body: bool) {
        while let Some(t) = self.peek() {
            match t.kind {
                TokenKind::RBrace => {
                    self.bump();
                    if in_body {
                        return;
                    }
                }
                TokenKind::LBrace => self.skip_group(TokenKind::LBrace, TokenKind::RBrace),
                _ => {
                    let before = self.pos;
                    self.read_class_header(enclosing);
                    if self.pos == before {
                        self.bump();
                    }
                }
            }
        }
    }

    /// Try to read annotations, modifiers and a class header at the current
    /// position. Consumes what it recognised even when no class follows.
    fn read_class_header(&mut self, enclosing: &[String]) {
        if self.pos > 0
            && matches!(
                self.tokens[self.pos - 1].kind,
                TokenKind::Dot | TokenKind::ColonColon
            )
        {
            // `Foo.class` / `Foo::class` inside an initializer
            return;
        }

        let mut annotations = Vec::new();
        let mut is_enum = false;
        let mut is_annotation = false;
        let mut is_companion = false;

        loop {
            if self.at(TokenKind::At) {
                if self.peek_nth(1).is_some_and(|t| t.is_ident("interface")) {
                    break;
                }
                if let Some(annotation) = self.read_annotation() {
                    annotations.push(annotation);
                }
            } else if let Some(modifier) = self
                .peek()
                .filter(|t| t.kind == TokenKind::Ident && MODIFIERS.contains(&t.text))
                .map(|t| t.text)
            {
                // Java `enum` is the keyword itself, not a modifier.
                if modifier == "enum" && self.syntax == SourceSyntax::Java {
                    break;
                }
                match modifier {
                    "enum" => is_enum = true,
                    "annotation" => is_annotation = true,
                    "companion" => is_companion = true,
                    _ => {}
                }
                self.bump();
            } else {
                break;
            }
        }

        let kind = match self.peek() {
            Some(t) if t.kind == TokenKind::At => {
                self.bump();
                RawKind::Annotation
            }
            Some(t) if t.is_ident("class") => {
                if is_enum {
                    RawKind::Enum
                } else if is_annotation {
                    RawKind::Annotation
                } else {
                    RawKind::Class
                }
            }
            Some(t) if t.is_ident("interface") => RawKind::Interface,
            Some(t) if t.is_ident("enum") => RawKind::Enum,
            Some(t) if t.is_ident("object") && self.syntax == SourceSyntax::Kotlin => {
                RawKind::Object
            }
            _ => return,
        };
        self.bump();

        let name = match self.peek() {
            Some(t) if t.kind == TokenKind::Ident && !DECLARATION_STARTS.contains(&t.text) => {
                let name = t.text.to_string();
                self.bump();
                name
            }
            _ if is_companion && kind == RawKind::Object => "Companion".to_string(),
            _ => return,
        };

        let mut path = enclosing.to_vec();
        path.push(name);
        self.classes.push(RawClass {
            path: path.clone(),
            kind,
            annotations,
        });

        if self.skip_to_body() {
            self.bump();
            self.read_members(&path, true);
        }
    }

    /// Skip type parameters, supertypes and constructor parameters. Returns
    /// true when positioned at the `{` of a class body.
    fn skip_to_body(&mut self) -> bool {
        while let Some(t) = self.peek() {
            match t.kind {
                TokenKind::LBrace => return true,
                TokenKind::Semicolon => {
                    self.bump();
                    return false;
                }
                TokenKind::RBrace => return false,
                TokenKind::At => {
                    // `class Foo @Inject constructor(...)` keeps the header going;
                    // anything else belongs to the next declaration.
                    let start = self.pos;
                    while self.at(TokenKind::At) && self.read_annotation().is_some() {}
                    if !self.at_ident("constructor") {
                        self.pos = start;
                        return false;
                    }
                }
                TokenKind::LParen => self.skip_group(TokenKind::LParen, TokenKind::RParen),
                TokenKind::LBracket => self.skip_group(TokenKind::LBracket, TokenKind::RBracket),
                TokenKind::Lt => self.skip_group(TokenKind::Lt, TokenKind::Gt),
                TokenKind::Ident
                    if MODIFIERS.contains(&t.text)
                        && self.peek_nth(1).is_some_and(|n| n.is_ident("constructor")) =>
                {
                    self.bump();
                }
                TokenKind::Ident
                    if DECLARATION_STARTS.contains(&t.text) || MODIFIERS.contains(&t.text) =>
                {
                    return false;
                }
                _ => self.bump(),
            }
        }
        false
    }

    // ------------------------------------------------------------------------
    // Annotations
    // ------------------------------------------------------------------------

    fn read_annotation(&mut self) -> Option<RawAnnotation> {
        self.bump(); // @
        // Kotlin use-site target: `@field:Named`
        if self.peek_nth(1).is_some_and(|t| t.kind == TokenKind::Colon) {
            self.bump();
            self.bump();
        }
        let name = self.read_dotted_name()?.join(".");
        let arguments = if self.at(TokenKind::LParen) {
            self.read_arguments()
        } else {
            Vec::new()
        };
        Some(RawAnnotation { name, arguments })
    }

    fn read_arguments(&mut self) -> Vec<RawArgument> {
        self.bump(); // (
        let mut arguments = Vec::new();
        while let Some(t) = self.peek() {
            if t.kind == TokenKind::RParen {
                self.bump();
                break;
            }
            let before = self.pos;
            let name = if t.kind == TokenKind::Ident
                && self.peek_nth(1).is_some_and(|n| n.kind == TokenKind::Eq)
                && !self.peek_nth(2).is_some_and(|n| n.kind == TokenKind::Eq)
            {
                let name = t.text.to_string();
                self.bump();
                self.bump();
                Some(name)
            } else {
                None
            };
            let value = self.read_value();
            arguments.push(RawArgument { name, value });
            if !self.eat(TokenKind::Comma) && !self.at(TokenKind::RParen) && self.pos == before {
                self.bump();
            }
        }
        arguments
    }

    fn read_value(&mut self) -> RawValue {
        let Some(t) = self.peek() else {
            return RawValue::Other(String::new());
        };
        match t.kind {
            TokenKind::LBrace => self.read_list(TokenKind::RBrace, ListForm::Braces),
            TokenKind::LBracket => self.read_list(TokenKind::RBracket, ListForm::Brackets),
            TokenKind::Ident
                if t.text == "arrayOf"
                    && self.peek_nth(1).is_some_and(|n| n.kind == TokenKind::LParen) =>
            {
                self.bump();
                self.read_list(TokenKind::RParen, ListForm::ArrayOf)
            }
            TokenKind::Ident => {
                let start = self.pos;
                if let Some(name) = self.read_class_ref() {
                    if self.at_value_end() {
                        return RawValue::ClassRef(name);
                    }
                }
                self.pos = start;
                self.read_other()
            }
            _ => self.read_other(),
        }
    }

    /// `a.b.Foo.class` (Java) or `a.b.Foo::class` (Kotlin, optionally `.java`).
    fn read_class_ref(&mut self) -> Option<String> {
        let mut segments = self.read_dotted_name()?;
        match self.syntax {
            SourceSyntax::Java => {
                if segments.len() > 1 && segments.last() == Some(&"class") {
                    segments.pop();
                    return Some(segments.join("."));
                }
                None
            }
            SourceSyntax::Kotlin => {
                if self.at(TokenKind::ColonColon)
                    && self.peek_nth(1).is_some_and(|t| t.is_ident("class"))
                {
                    self.bump();
                    self.bump();
                    if self.at(TokenKind::Dot) && self.peek_nth(1).is_some_and(|t| t.is_ident("java")) {
                        self.bump();
                        self.bump();
                    }
                    return Some(segments.join("."));
                }
                None
            }
        }
    }

    fn read_list(&mut self, close: TokenKind, form: ListForm) -> RawValue {
        self.bump(); // opening token
        let mut items = Vec::new();
        while let Some(t) = self.peek() {
            if t.kind == close {
                self.bump();
                break;
            }
            if t.kind == TokenKind::Comma {
                self.bump();
                continue;
            }
            let before = self.pos;
            items.push(self.read_value());
            if self.pos == before {
                self.bump();
            }
        }
        RawValue::List(items, form)
    }

    /// Any other expression, up to the next separator at this nesting level.
    fn read_other(&mut self) -> RawValue {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(t) = self.peek() {
            match t.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace if depth == 0 => break,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => depth -= 1,
                TokenKind::Comma if depth == 0 => break,
                _ => {}
            }
            self.bump();
        }
        RawValue::Other(self.text_between(start, self.pos))
    }

    fn text_between(&self, start: usize, end: usize) -> String {
        if start >= end {
            return String::new();
        }
        let from = self.tokens[start].offset;
        let last = &self.tokens[end - 1];
        self.source[from..last.offset + last.text.len()].to_string()
    }
}

// ============================================================================
// NAME RESOLUTION + LOWERING
// ============================================================================

struct NameResolver<'a> {
    package: &'a str,
    imports: &'a [Import],
    /// Dot-joined class paths declared in this file, relative to the package.
    declared: FxHashSet<String>,
}

impl<'a> NameResolver<'a> {
    fn new(package: &'a str, imports: &'a [Import], classes: &[RawClass]) -> Self {
        Self {
            package,
            imports,
            declared: classes.iter().map(|c| c.path.join(".")).collect(),
        }
    }

    fn qualify(&self, relative: &str) -> QualifiedName {
        if self.package.is_empty() {
            QualifiedName::from(relative)
        } else {
            QualifiedName::from(format!("{}.{}", self.package, relative))
        }
    }

    fn resolve(&self, name: &str, scope: &[String]) -> QualifiedName {
        let (first, rest) = match name.split_once('.') {
            Some((first, rest)) => (first, Some(rest)),
            None => (name, None),
        };
        let with_rest = |head: &str| match rest {
            Some(rest) => format!("{head}.{rest}"),
            None => head.to_string(),
        };

        for depth in (0..=scope.len()).rev() {
            let mut candidate = scope[..depth].join(".");
            if !candidate.is_empty() {
                candidate.push('.');
            }
            candidate.push_str(first);
            if self.declared.contains(&candidate) {
                return self.qualify(&with_rest(&candidate));
            }
        }

        if let Some(import) = self
            .imports
            .iter()
            .find(|import| import.bound_name() == Some(first))
        {
            return QualifiedName::from(with_rest(&import.path));
        }

        if rest.is_some() && first.starts_with(|c: char| c.is_ascii_lowercase()) {
            return QualifiedName::from(name);
        }

        self.qualify(name)
    }

    fn lower(&self, class: &RawClass, syntax: SourceSyntax) -> Declaration {
        let fq_name = self.qualify(&class.path.join("."));
        match syntax {
            SourceSyntax::Java => {
                let kind = match class.kind {
                    RawKind::Interface => JavaClassKind::Interface,
                    RawKind::Enum => JavaClassKind::Enum,
                    RawKind::Annotation => JavaClassKind::Annotation,
                    RawKind::Class | RawKind::Object => JavaClassKind::Class,
                };
                let mut java = JavaClass::new(fq_name, kind);
                for raw in &class.annotations {
                    let mut annotation = JavaAnnotation::new(self.resolve(&raw.name, &class.path));
                    for argument in &raw.arguments {
                        let name = argument.name.as_deref().unwrap_or("value");
                        annotation.set_attribute(name, self.java_value(&argument.value, &class.path));
                    }
                    java = java.with_annotation(annotation);
                }
                java.into()
            }
            SourceSyntax::Kotlin => {
                let kind = match class.kind {
                    RawKind::Class => KotlinClassKind::Class,
                    RawKind::Interface => KotlinClassKind::Interface,
                    RawKind::Enum => KotlinClassKind::EnumClass,
                    RawKind::Annotation => KotlinClassKind::AnnotationClass,
                    RawKind::Object => KotlinClassKind::Object,
                };
                let mut kotlin = KotlinClass::new(fq_name, kind);
                for raw in &class.annotations {
                    let mut entry = KtAnnotationEntry::new(self.resolve(&raw.name, &class.path));
                    for argument in &raw.arguments {
                        let expression = self.kotlin_expression(&argument.value, &class.path);
                        entry = entry.with_argument(match &argument.name {
                            Some(name) => KtValueArgument::named(name, expression),
                            None => KtValueArgument::positional(expression),
                        });
                    }
                    kotlin = kotlin.with_annotation_entry(entry);
                }
                kotlin.into()
            }
        }
    }

    fn java_value(&self, value: &RawValue, scope: &[String]) -> JavaMemberValue {
        match value {
            RawValue::ClassRef(name) => JavaMemberValue::ClassObject(self.resolve(name, scope)),
            RawValue::List(items, _) => JavaMemberValue::ArrayInitializer(
                items.iter().map(|item| self.java_value(item, scope)).collect(),
            ),
            RawValue::Other(text) => JavaMemberValue::Other(text.clone()),
        }
    }

    fn kotlin_expression(&self, value: &RawValue, scope: &[String]) -> KtExpression {
        match value {
            RawValue::ClassRef(name) => KtExpression::ClassLiteral(self.resolve(name, scope)),
            RawValue::List(items, form) => {
                let items = items
                    .iter()
                    .map(|item| self.kotlin_expression(item, scope))
                    .collect();
                match form {
                    ListForm::ArrayOf => KtExpression::ArrayOfCall(items),
                    ListForm::Brackets | ListForm::Braces => KtExpression::CollectionLiteral(items),
                }
            }
            RawValue::Other(text) => KtExpression::Other(text.clone()),
        }
    }
}
