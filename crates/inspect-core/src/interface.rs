use crate::types::Interface;

/// One member of an interface body, classified by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberShape {
    /// An embedded interface named by a plain identifier.
    Embedded(String),
    /// An embedded interface from another package: `package.Name`.
    Qualified { package: String, name: String },
    /// A named method. `func_type` is the rendered function type,
    /// e.g. `func(p []byte) (n int, err error)`.
    Method { name: String, func_type: String },
}

/// An interface type declaration with its classified members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    pub name: String,
    pub members: Vec<MemberShape>,
}

/// Fold classified members into an [`Interface`], keeping source order.
pub fn build_interface(decl: InterfaceDecl) -> Interface {
    let mut iface = Interface::new(decl.name);
    for member in decl.members {
        match member {
            MemberShape::Embedded(name) => iface.embedded_interfaces.push(name),
            MemberShape::Qualified { package, name } => {
                iface.embedded_interfaces.push(format!("{package}.{name}"))
            }
            MemberShape::Method { name, func_type } => {
                iface.methods.push(method_signature(&name, &func_type))
            }
        }
    }
    iface
}

/// Splice a method name into a function type at the opening of its
/// parameter list: `func(x int) error` becomes `Name(x int) error`.
fn method_signature(name: &str, func_type: &str) -> String {
    let params = match func_type.find('(') {
        Some(open) => &func_type[open..],
        None => func_type,
    };
    format!("{name}{params}")
}
