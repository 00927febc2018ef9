use std::collections::BTreeMap;

use smol_str::SmolStr;

use super::symbols::{Details, FunctionDetails, SymbolData, SymbolId, SymbolKind, SymbolTable};

const TYPES: &[&str] = &["int32", "int64", "float64", "bool", "string", "char", "unit"];
const FUNCTIONS: &[&str] = &["print", "println"];

/// Symbols every compilation has without declaring them.
#[derive(Debug)]
pub(crate) struct Intrinsics {
    pub unit: SymbolId,

    /// What unresolved names refer to.
    pub error: SymbolId,

    names: BTreeMap<SmolStr, SymbolId>,
}

impl Intrinsics {
    pub fn new(symbols: &SymbolTable) -> Self {
        let mut names = BTreeMap::new();

        for name in TYPES {
            let id = symbols.add(intrinsic(name, SymbolKind::Type, Details::None));
            names.insert(SmolStr::new(name), id);
        }

        for name in FUNCTIONS {
            let details = Details::Function(FunctionDetails::default());
            let id = symbols.add(intrinsic(name, SymbolKind::Function, details));
            names.insert(SmolStr::new(name), id);
        }

        let unit = names["unit"];
        let error = symbols.add(intrinsic("<error>", SymbolKind::Error, Details::None));

        Self { unit, error, names }
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.names.get(name).copied()
    }
}

fn intrinsic(name: &str, kind: SymbolKind, details: Details) -> SymbolData {
    SymbolData { name: name.into(), kind, declaration: None, container: None, details }
}
