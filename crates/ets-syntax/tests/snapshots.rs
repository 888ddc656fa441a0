//! Snapshot tests for the reader and writer.
//!
//! Rendered JavaScript is compared with inline snapshots; run
//! `cargo insta review` to update them after intentional changes.

use ets_syntax::{Node, NodeData, ParseOptions, convert_source, to_javascript};

fn parse(code: &str) -> Node {
    convert_source(code, "test.ets", &ParseOptions::default()).expect("parse failed")
}

fn js(code: &str) -> String {
    to_javascript(&parse(code)).trim_end().to_string()
}

fn statements(root: &Node) -> &[Node] {
    match root.data() {
        NodeData::SourceFile { statements, .. } => statements,
        other => panic!("expected source file, got {other:?}"),
    }
}

// ============================================================================
// Writer Snapshots - verify regenerated JavaScript
// ============================================================================

mod js_writer {
    use super::*;

    #[test]
    fn resource_references() {
        insta::assert_snapshot!(js("
const a = $r('app.string.hello');
const b = $r('sys.color.red');
const c = $rawfile('icon.png');
"), @r#"
        const a = __getResourceId__(10003, undefined, "app", "hello");
        const b = __getResourceId__(10001, undefined, "sys", "red");
        const c = __getRawFileId__("icon.png");
        "#);
    }

    /// Every case gets a trailing `break`, so fall-through between cases is
    /// not preserved.
    #[test]
    fn switch_inserts_break_after_every_case() {
        insta::assert_snapshot!(js("
switch (x) {
  case 1:
  case 2:
    y = 1;
    break;
  default:
    y = 0;
}
"), @r"
        switch (x) {
          case 1:
            break;
          case 2:
            y = 1;
            break;
            break;
          default:
            y = 0;
        }
        ");
    }

    #[test]
    fn const_without_initializer() {
        insta::assert_snapshot!(js("const a;\nlet b;\nvar c, d = 2;"), @r"
        const a = undefined;
        let b;
        var c, d = 2;
        ");
    }

    #[test]
    fn type_syntax_is_stripped() {
        insta::assert_snapshot!(js("
const v = user?.profile?.[key]!;
const n = (value as number) + 1;
const w = <string>raw;
"), @r"
        const v = user?.profile?.[key];
        const n = (value) + 1;
        const w = raw;
        ");
    }

    #[test]
    fn modules() {
        insta::assert_snapshot!(js("
import { a, b as c } from './m';
import type { T } from './t';
export { a as d };
interface I { x: number }
type Alias = string;
export default c;
"), @r"
        import { a, b as c } from './m';
        export { a as d };
        export default c;
        ");
    }

    #[test]
    fn component_struct() {
        insta::assert_snapshot!(js("
@Entry
@Component
struct Index {
  @State message: string = 'Hello'

  build() {
    Text(this.message).fontSize(50)
  }
}
"), @r#"
        export class Index {
          message = "Hello";
          build() {
          Text(this.message).fontSize(50);
        }
        }
        "#);
    }

    /// A trailing-closure component splits the attribute chain during
    /// parsing; the attributes must stay on the component call.
    #[test]
    fn attribute_chain_after_trailing_closure() {
        let out = js("
@Component
struct Card {
  build() {
    Column() {
      Text('a')
    }
    .width('100%')
    .height(50)
  }
}
");
        assert!(
            out.contains(r#"Column().width("100%").height(50);"#),
            "attribute chain lost its receiver:\n{out}"
        );
        assert!(
            !out.lines().any(|line| line.trim_start().starts_with("width(")),
            "attribute rendered as a free call:\n{out}"
        );
        assert!(out.contains(r#"Text("a");"#));
    }

    #[test]
    fn unbraced_bodies() {
        insta::assert_snapshot!(js("if (a) b(); else if (c) d();\nouter: for (const k in obj) continue outer;"), @r"
        if (a) b(); else if (c) d();
        outer: for (const k in obj) continue outer;
        ");
    }

    #[test]
    fn chained_else_if() {
        insta::assert_snapshot!(js("if (a) { x(); } else if (b) { y(); } else { z(); }"), @r"
        if (a) {
          x();
        } else if (b) {
          y();
        } else {
          z();
        }
        ");
    }
}

// ============================================================================
// Reader Checks - verify converted IR
// ============================================================================

mod ets_reader {
    use super::*;
    use ets_syntax::{Argument, ReadError};

    fn class_at(root: &Node, index: usize) -> &NodeData {
        statements(root)[index].data()
    }

    #[test]
    fn struct_decorators_and_rewrite() {
        let root = parse("@Component\nstruct Card {\n  @State private x: number = 0\n}\n");
        let NodeData::ClassDeclaration {
            name,
            is_export,
            decorators,
            members,
            ..
        } = class_at(&root, 0)
        else {
            panic!("struct should become a class");
        };
        assert_eq!(name, "Card");
        assert!(!is_export);
        assert_eq!(decorators.len(), 1);
        assert_eq!(decorators[0].name, "Component");
        assert_eq!(decorators[0].full_text, "@Component");

        let NodeData::PropertyDeclaration { decorators, .. } = members[0].data() else {
            panic!("expected property");
        };
        assert_eq!(decorators[0].name, "State");
        assert_eq!(decorators[0].full_text, "@State");
    }

    #[test]
    fn decorator_arguments_are_raw_text() {
        let root = parse(
            "@Component\nstruct Card {\n  @Link @Watch('onChange') count: number\n}\n",
        );
        let NodeData::ClassDeclaration { members, .. } = class_at(&root, 0) else {
            panic!("expected class");
        };
        let NodeData::PropertyDeclaration { decorators, .. } = members[0].data() else {
            panic!("expected property");
        };
        let names: Vec<_> = decorators.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Link", "Watch"]);
        assert_eq!(decorators[0].arguments, None);
        assert_eq!(decorators[1].arguments, Some(vec!["'onChange'".to_string()]));
    }

    #[test]
    fn decorators_stay_with_their_struct() {
        let root = parse("@Entry\n@Component\nstruct Page {}\n\n@Component\nstruct Row {}\n");
        let counts: Vec<usize> = statements(&root)
            .iter()
            .map(|s| match s.data() {
                NodeData::ClassDeclaration { decorators, .. } => decorators.len(),
                _ => 0,
            })
            .collect();
        assert_eq!(counts, [2, 1]);
    }

    #[test]
    fn for_each_arguments_are_structured() {
        let root = parse("ForEach(this.items, (item) => { Text(item) }, (item) => item.id)\n");
        let expr = root
            .find(&|n| n.kind_name() == "CallExpression")
            .expect("call");
        let NodeData::CallExpression { arguments, .. } = expr.data() else {
            unreachable!()
        };
        let kinds: Vec<_> = arguments
            .iter()
            .filter_map(Argument::as_node)
            .map(|n| n.kind_name())
            .collect();
        assert_eq!(
            kinds,
            ["PropertyAccessExpression", "ArrowFunction", "ArrowFunction"]
        );
    }

    #[test]
    fn chained_call_on_outermost_node() {
        let root = parse("Text('hello').fontSize(20).fontWeight(FontWeight.Bold)\n");
        let outer = root
            .find(&|n| n.kind_name() == "CallExpression")
            .expect("call");
        let NodeData::CallExpression {
            is_chained_call,
            component_name,
            method_name,
            ..
        } = outer.data()
        else {
            unreachable!()
        };
        assert!(is_chained_call);
        assert_eq!(component_name.as_deref(), Some("Text"));
        assert_eq!(method_name.as_deref(), Some("fontWeight"));
    }

    #[test]
    fn json_shape() {
        let root = parse("const a = 1;");
        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(value["kindName"], "SourceFile");
        assert_eq!(value["fileName"], "test.ets");
        let stmt = &value["statements"][0];
        assert_eq!(stmt["kindName"], "VariableStatement");
        assert_eq!(stmt["declarationList"]["declarationKind"], "const");
        assert_eq!(
            stmt["declarationList"]["declarations"][0]["initializer"]["text"],
            "1"
        );
    }

    #[test]
    fn strict_mode_rejects_syntax_errors() {
        let strict = ParseOptions { strict: true };
        let err = convert_source("let = ;\n", "bad.ets", &strict).unwrap_err();
        assert!(matches!(err, ReadError::Syntax { line: 1, .. }));
        assert!(convert_source("let = ;\n", "bad.ets", &ParseOptions::default()).is_ok());
    }
}

// ============================================================================
// Round Trip - convert, render, convert again
// ============================================================================

mod round_trip {
    use super::*;
    use ets_syntax::StructureEq;

    fn assert_round_trip(code: &str) {
        let first = parse(code);
        let regenerated = to_javascript(&first);
        let second = parse(&regenerated);
        assert!(
            first.structure_eq(&second),
            "structure changed after regeneration:\n{regenerated}"
        );
    }

    #[test]
    fn loops() {
        assert_round_trip(
            "let total = 0;\nfor (let i = 0; i < 10; i++) {\n  total += i;\n}\nwhile (total > 0) {\n  total--;\n}\ndo {\n  total++;\n} while (total < 3);\n",
        );
    }

    #[test]
    fn for_of_with_branches() {
        assert_round_trip(
            "for (const item of items) {\n  if (item > 1) {\n    log(item);\n  } else {\n    skip();\n  }\n}\n",
        );
    }

    #[test]
    fn expressions() {
        assert_round_trip(
            "const add = (a, b) => a + b;\ntry {\n  add(1, 2);\n} catch (e) {\n  report(e);\n} finally {\n  done();\n}\nconst obj = {a: 1, b: [2, 3], c};\nconst s = `sum ${add(1, 2)} ok`;\nconst t = flag ? -x : typeof y;\n",
        );
    }

    #[test]
    fn unbraced_branches() {
        assert_round_trip("if (a) b(); else if (c) d();\n");
        assert_round_trip("if (a) b(); else { c(); }\nwhile (busy) ;\n");
    }

    #[test]
    fn labeled_for_in_with_unbraced_continue() {
        assert_round_trip("outer: for (const k in obj) continue outer;\n");
    }

    #[test]
    fn declarations() {
        assert_round_trip(
            "function greet(name, greeting = 'hi') {\n  return greeting + name;\n}\nclass Counter extends Base {\n  count = 0;\n  constructor(start) {\n    super();\n    this.count = start;\n  }\n  static create() {\n    return new Counter(0);\n  }\n}\n",
        );
    }
}
