//! Parsing of argument type descriptors.
//!
//! Call arguments in metadata carry type names as written in the pallet
//! source, for example `Compact<BalanceOf<T>>`,
//! `<T::Lookup as StaticLookup>::Source` or `BoundedVec<u8, T::MaxLength>`.
//! These are parsed into [`TypeDescriptor`] trees, so that the renderer could
//! pick display depending on the type shape.
//!
//! Whitespace between tokens is not significant.
use crate::std::{
    string::{String, ToString},
    vec::Vec,
};

use crate::error::TypeDescriptorError;

/// Type descriptor shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeInfo {
    BTreeMap,
    BTreeSet,
    Compact,
    HashMap,
    Null,
    Option,
    Plain,
    Range,
    Result,
    Tuple,
    Vec,
    VecFixed,
}

/// Parsed type descriptor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeDescriptor {
    pub info: TypeInfo,

    /// Normalized descriptor text, with `Box` unwrapped and bounded vectors
    /// shown as `Vec`.
    pub type_name: String,

    /// Inner descriptors: the wrapped type, tuple elements, map key and
    /// value etc.
    pub sub: Vec<TypeDescriptor>,

    /// Length, for fixed size arrays only.
    pub length: Option<u32>,
}

impl TypeDescriptor {
    fn plain(type_name: String) -> Self {
        Self {
            info: TypeInfo::Plain,
            type_name,
            sub: Vec::new(),
            length: None,
        }
    }

    fn wrapper(info: TypeInfo, wrapper_name: &str, sub: Vec<TypeDescriptor>) -> Self {
        let type_name = format!("{wrapper_name}<{}>", joined_names(&sub));
        Self {
            info,
            type_name,
            sub,
            length: None,
        }
    }
}

/// Parse type descriptor text.
pub fn parse_type_descriptor(descriptor: &str) -> Result<TypeDescriptor, TypeDescriptorError> {
    let mut parser = DescriptorParser {
        chars: descriptor.chars().collect(),
        position: 0,
    };
    if parser.peek().is_none() {
        return Err(TypeDescriptorError::Empty);
    }
    let out = parser.parse_type()?;
    if parser.peek().is_some() {
        Err(TypeDescriptorError::TrailingCharacters {
            position: parser.position,
        })
    } else {
        Ok(out)
    }
}

fn joined_names(set: &[TypeDescriptor]) -> String {
    set.iter()
        .map(|x| x.type_name.as_str())
        .collect::<Vec<&str>>()
        .join(", ")
}

struct DescriptorParser {
    chars: Vec<char>,
    position: usize,
}

impl DescriptorParser {
    /// Next meaningful character. Skips whitespace.
    fn peek(&mut self) -> Option<char> {
        while let Some(c) = self.chars.get(self.position) {
            if c.is_whitespace() {
                self.position += 1
            } else {
                return Some(*c);
            }
        }
        None
    }

    fn unexpected(&mut self) -> TypeDescriptorError {
        match self.peek() {
            Some(found) => TypeDescriptorError::UnexpectedCharacter {
                position: self.position,
                found,
            },
            None => TypeDescriptorError::UnbalancedBrackets {
                position: self.position,
            },
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeDescriptorError> {
        if self.peek() == Some(expected) {
            self.position += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_type(&mut self) -> Result<TypeDescriptor, TypeDescriptorError> {
        match self.peek() {
            Some('(') => self.parse_tuple(),
            Some('[') => self.parse_array(),
            Some('<') => self.parse_qualified(),
            Some(c) if is_ident_char(c) => self.parse_named(),
            _ => Err(self.unexpected()),
        }
    }

    /// Comma-separated types until `closing` bracket, consumed.
    ///
    /// Also reports if the list had a trailing comma.
    fn parse_list(
        &mut self,
        closing: char,
    ) -> Result<(Vec<TypeDescriptor>, bool), TypeDescriptorError> {
        let mut out = Vec::new();
        let mut trailing_comma = false;
        loop {
            if self.peek() == Some(closing) {
                self.position += 1;
                return Ok((out, trailing_comma));
            }
            out.push(self.parse_type()?);
            trailing_comma = false;
            match self.peek() {
                Some(',') => {
                    self.position += 1;
                    trailing_comma = true;
                }
                Some(c) if c == closing => {}
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_tuple(&mut self) -> Result<TypeDescriptor, TypeDescriptorError> {
        self.expect('(')?;
        let (mut sub, trailing_comma) = self.parse_list(')')?;
        if sub.is_empty() {
            Ok(TypeDescriptor {
                info: TypeInfo::Null,
                type_name: String::from("()"),
                sub,
                length: None,
            })
        } else if sub.len() == 1 && !trailing_comma {
            // parenthesized single type
            Ok(sub.remove(0))
        } else {
            Ok(TypeDescriptor {
                info: TypeInfo::Tuple,
                type_name: format!("({})", joined_names(&sub)),
                sub,
                length: None,
            })
        }
    }

    fn parse_array(&mut self) -> Result<TypeDescriptor, TypeDescriptorError> {
        self.expect('[')?;
        let element = self.parse_type()?;
        self.expect(';')?;
        self.peek();
        let start = self.position;
        while let Some(c) = self.chars.get(self.position) {
            if c.is_ascii_digit() {
                self.position += 1
            } else {
                break;
            }
        }
        let length: u32 = self.chars[start..self.position]
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| TypeDescriptorError::ArrayLength { position: start })?;
        self.expect(']')?;
        Ok(TypeDescriptor {
            info: TypeInfo::VecFixed,
            type_name: format!("[{}; {length}]", element.type_name),
            sub: vec![element],
            length: Some(length),
        })
    }

    /// Qualified path, such as `<T::Lookup as StaticLookup>::Source`. Always
    /// plain.
    fn parse_qualified(&mut self) -> Result<TypeDescriptor, TypeDescriptorError> {
        self.expect('<')?;
        let self_ty = self.parse_type()?;
        let mut type_name = format!("<{}", self_ty.type_name);
        if self.peek() != Some('>') {
            let keyword = self.parse_ident()?;
            if keyword != "as" {
                return Err(TypeDescriptorError::UnexpectedCharacter {
                    position: self.position - keyword.chars().count(),
                    found: keyword.chars().next().unwrap_or(' '),
                });
            }
            let trait_path = self.parse_named()?;
            type_name.push_str(" as ");
            type_name.push_str(&trait_path.type_name);
        }
        self.expect('>')?;
        type_name.push('>');
        while self.peek() == Some(':') {
            self.expect(':')?;
            self.expect(':')?;
            type_name.push_str("::");
            type_name.push_str(&self.parse_ident()?);
        }
        Ok(TypeDescriptor::plain(type_name))
    }

    fn parse_ident(&mut self) -> Result<String, TypeDescriptorError> {
        self.peek();
        let start = self.position;
        while let Some(c) = self.chars.get(self.position) {
            if is_ident_char(*c) {
                self.position += 1
            } else {
                break;
            }
        }
        if start == self.position {
            Err(self.unexpected())
        } else {
            Ok(self.chars[start..self.position].iter().collect())
        }
    }

    fn parse_named(&mut self) -> Result<TypeDescriptor, TypeDescriptorError> {
        let mut path = self.parse_ident()?;
        while self.peek() == Some(':') {
            self.expect(':')?;
            self.expect(':')?;
            path.push_str("::");
            path.push_str(&self.parse_ident()?);
        }
        if self.peek() != Some('<') {
            return Ok(TypeDescriptor::plain(path));
        }
        self.expect('<')?;
        let (mut args, _) = self.parse_list('>')?;
        let ident = path.rsplit("::").next().unwrap_or(&path).to_string();
        let out = match (ident.as_str(), args.len()) {
            ("Box", 1) => args.remove(0),
            ("Compact", 1) => TypeDescriptor::wrapper(TypeInfo::Compact, "Compact", args),
            ("Option", 1) => TypeDescriptor::wrapper(TypeInfo::Option, "Option", args),
            ("Vec", 1) | ("BoundedVec", 2) | ("WeakBoundedVec", 2) => {
                args.truncate(1);
                TypeDescriptor::wrapper(TypeInfo::Vec, "Vec", args)
            }
            ("Result", 2) => TypeDescriptor::wrapper(TypeInfo::Result, "Result", args),
            ("BTreeMap", 2) | ("BoundedBTreeMap", 3) => {
                args.truncate(2);
                TypeDescriptor::wrapper(TypeInfo::BTreeMap, "BTreeMap", args)
            }
            ("BTreeSet", 1) | ("BoundedBTreeSet", 2) => {
                args.truncate(1);
                TypeDescriptor::wrapper(TypeInfo::BTreeSet, "BTreeSet", args)
            }
            ("HashMap", 2) => TypeDescriptor::wrapper(TypeInfo::HashMap, "HashMap", args),
            ("Range", 1) | ("RangeInclusive", 1) => {
                TypeDescriptor::wrapper(TypeInfo::Range, &ident, args)
            }
            _ => TypeDescriptor::plain(format!("{path}<{}>", joined_names(&args))),
        };
        Ok(out)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_types() {
        let parsed = parse_type_descriptor("T::Balance").unwrap();
        assert_eq!(parsed.info, TypeInfo::Plain);
        assert_eq!(parsed.type_name, "T::Balance");
        assert!(parsed.sub.is_empty());

        let parsed = parse_type_descriptor(" u128 ").unwrap();
        assert_eq!(parsed.info, TypeInfo::Plain);
        assert_eq!(parsed.type_name, "u128");
    }

    #[test]
    fn compact_balance() {
        let parsed = parse_type_descriptor("Compact< BalanceOf<T> >").unwrap();
        assert_eq!(parsed.info, TypeInfo::Compact);
        assert_eq!(parsed.type_name, "Compact<BalanceOf<T>>");
        assert_eq!(parsed.sub[0].info, TypeInfo::Plain);
        assert_eq!(parsed.sub[0].type_name, "BalanceOf<T>");
    }

    #[test]
    fn qualified_path() {
        let parsed = parse_type_descriptor("<T::Lookup as StaticLookup>::Source").unwrap();
        assert_eq!(parsed.info, TypeInfo::Plain);
        assert_eq!(parsed.type_name, "<T::Lookup as StaticLookup>::Source");

        let parsed = parse_type_descriptor("<T as Config>::Hash").unwrap();
        assert_eq!(parsed.type_name, "<T as Config>::Hash");
    }

    #[test]
    fn bounded_vec_and_box() {
        let parsed = parse_type_descriptor("BoundedVec<u8, T::MaxLength>").unwrap();
        assert_eq!(parsed.info, TypeInfo::Vec);
        assert_eq!(parsed.type_name, "Vec<u8>");

        let parsed = parse_type_descriptor("Box<<T as Config>::RuntimeCall>").unwrap();
        assert_eq!(parsed.info, TypeInfo::Plain);
        assert_eq!(parsed.type_name, "<T as Config>::RuntimeCall");
    }

    #[test]
    fn tuples_and_arrays() {
        let parsed = parse_type_descriptor("(T::AccountId, Vec<u8>)").unwrap();
        assert_eq!(parsed.info, TypeInfo::Tuple);
        assert_eq!(parsed.type_name, "(T::AccountId, Vec<u8>)");
        assert_eq!(parsed.sub.len(), 2);

        let parsed = parse_type_descriptor("(u32,)").unwrap();
        assert_eq!(parsed.info, TypeInfo::Tuple);

        let parsed = parse_type_descriptor("(u32)").unwrap();
        assert_eq!(parsed.info, TypeInfo::Plain);

        let parsed = parse_type_descriptor("()").unwrap();
        assert_eq!(parsed.info, TypeInfo::Null);

        let parsed = parse_type_descriptor("[u8; 32]").unwrap();
        assert_eq!(parsed.info, TypeInfo::VecFixed);
        assert_eq!(parsed.length, Some(32));
        assert_eq!(parsed.type_name, "[u8; 32]");
    }

    #[test]
    fn maps_and_options() {
        let parsed =
            parse_type_descriptor("Option<BTreeMap<T::AccountId, Compact<u32>>>").unwrap();
        assert_eq!(parsed.info, TypeInfo::Option);
        let map = &parsed.sub[0];
        assert_eq!(map.info, TypeInfo::BTreeMap);
        assert_eq!(map.sub[1].info, TypeInfo::Compact);
        assert_eq!(
            parsed.type_name,
            "Option<BTreeMap<T::AccountId, Compact<u32>>>"
        );
    }

    #[test]
    fn malformed() {
        assert_eq!(parse_type_descriptor("  "), Err(TypeDescriptorError::Empty));
        assert_eq!(
            parse_type_descriptor("Vec<u8"),
            Err(TypeDescriptorError::UnbalancedBrackets { position: 6 })
        );
        assert_eq!(
            parse_type_descriptor("[u8; x]"),
            Err(TypeDescriptorError::ArrayLength { position: 5 })
        );
        assert_eq!(
            parse_type_descriptor("u8>"),
            Err(TypeDescriptorError::TrailingCharacters { position: 2 })
        );
        assert_eq!(
            parse_type_descriptor("Vec<&u8>"),
            Err(TypeDescriptorError::UnexpectedCharacter {
                position: 4,
                found: '&'
            })
        );
    }
}
