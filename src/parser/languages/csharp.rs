//! C# grammar configuration.

use crate::analysis::{DecisionKind, DeclarationKind, DeclarationRule, ParamRule, RuleTable};
use crate::language::Language;
use crate::parser::treesitter::{Config, TreeSitterGrammar};

/// Rule table for C#.
///
/// Methods only ever appear inside a type, and top-level statements are
/// wrapped in `global_statement`, so the shallow scan mostly reports types
/// and `using` directives.
pub static RULES: RuleTable = RuleTable {
    functions: &[
        DeclarationRule::new("method_declaration", DeclarationKind::Method),
        DeclarationRule::new("local_function_statement", DeclarationKind::Function),
    ],
    classes: &[
        DeclarationRule::new("class_declaration", DeclarationKind::Class),
        DeclarationRule::new("interface_declaration", DeclarationKind::Interface),
        DeclarationRule::new("struct_declaration", DeclarationKind::Struct),
        DeclarationRule::new("record_declaration", DeclarationKind::Record),
        DeclarationRule::new("enum_declaration", DeclarationKind::Enum),
    ],
    imports: &["using_directive"],
    identifiers: &["identifier"],
    parameters: ParamRule {
        list_kind: "parameter_list",
        param_kinds: &["parameter"],
    },
    decisions: &[
        ("if_statement", DecisionKind::If),
        ("while_statement", DecisionKind::While),
        ("do_statement", DecisionKind::While),
        ("for_statement", DecisionKind::For),
        ("foreach_statement", DecisionKind::For),
        ("switch_section", DecisionKind::Case),
        ("catch_clause", DecisionKind::Catch),
    ],
};

/// Create the C# grammar.
pub fn new_grammar() -> TreeSitterGrammar {
    TreeSitterGrammar::new(Config {
        language: tree_sitter_c_sharp::LANGUAGE.into(),
        tag: Language::CSharp,
        rules: &RULES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FeatureRecord;
    use crate::parser::parse_with;

    fn analyze(source: &str) -> FeatureRecord {
        let grammar = new_grammar();
        parse_with(&grammar, source).into_record()
    }

    #[test]
    fn test_csharp_declarations() {
        let source = r#"using System;
using System.Data.SqlClient;

public class OrderRepository
{
    public void Save(Order order)
    {
        foreach (var line in order.Lines)
        {
            if (line.Quantity == 0)
            {
                continue;
            }
        }
    }
}

public interface IRepository
{
    void Save(Order order);
}
"#;

        let record = analyze(source);

        assert_eq!(
            record.imports,
            vec!["using System;", "using System.Data.SqlClient;"]
        );
        assert!(record.functions.is_empty(), "Methods live inside types");
        assert_eq!(
            record.classes.iter().map(|c| (c.name.as_str(), c.kind)).collect::<Vec<_>>(),
            vec![
                ("OrderRepository", DeclarationKind::Class),
                ("IRepository", DeclarationKind::Interface)
            ]
        );
        assert_eq!(record.classes[0].start_line, 3);
        assert_eq!(record.classes[0].end_line, 15);
        // 1 + foreach + if
        assert_eq!(record.complexity, 3);
    }

    #[test]
    fn test_csharp_switch_and_catch() {
        let source = r#"
class Router
{
    int Route(string path)
    {
        try
        {
            switch (path)
            {
                case "/":
                    return 0;
                case "/health":
                    return 1;
            }
        }
        catch (Exception)
        {
            return -1;
        }
        return 2;
    }
}
"#;

        // 1 + 2 (sections) + catch
        assert_eq!(analyze(source).complexity, 4);
    }
}
