//! Declaration parser tests over realistic `.d.ts` text

use augments_declarations::{DeclarationParser, DefinitionKind, MemberKind, TypeDefinition};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const REACT_TYPES: &str = r#"/// <reference types="node" />

export type SetStateAction<S> = S | ((prevState: S) => S);
export type Dispatch<A> = (value: A) => void;

/**
 * Returns a stateful value, and a function to update it.
 *
 * @param initialState The value used on first render
 * @see https://react.dev/reference/react/useState
 * @example
 * const [count, setCount] = useState(0);
 */
export declare function useState<S>(initialState: S | (() => S)): [S, Dispatch<SetStateAction<S>>];
export declare function useState<S = undefined>(): [S | undefined, Dispatch<SetStateAction<S | undefined>>];

export declare function useReducer<R extends Reducer<any, any>>(reducer: R, initialState: ReducerState<R>): [ReducerState<R>, Dispatch<ReducerAction<R>>];

export type Reducer<S, A> = (prevState: S, action: A) => S;
export type ReducerState<R> = R extends Reducer<infer S, any> ? S : never;
export type ReducerAction<R> = R extends Reducer<any, infer A> ? A : never;

/** Accepts a function that contains imperative, possibly effectful code. */
export declare function useEffect(effect: EffectCallback, deps?: DependencyList): void;
export type EffectCallback = () => void | Destructor;
type Destructor = () => void;
type DependencyList = readonly unknown[];

/**
 * @deprecated Use createRoot instead
 */
export declare function render(element: ReactElement, container: Element | null): void;

export interface ReactElement<P = any, T = string> {
  type: T;
  props: P;
  key: string | null;
}

export interface FunctionComponent<P = {}> extends ComponentLifecycle {
  (props: P): ReactElement | null;
  displayName?: string;
  readonly defaultProps?: Partial<P>;
}

interface ComponentLifecycle {
  componentDidMount?(): void;
}

export declare class Component<P, S> {
  constructor(props: P);
  readonly props: Readonly<P>;
  state: S;
  setState(state: S): void;
  get isMounted(): boolean;
}

export declare enum Priority {
  Immediate = 1,
  Normal,
  Idle = "idle",
}

export declare const version: string;
export declare const createRef: <T>(initial: T | null) => RefObject<T>;
export interface RefObject<T> { readonly current: T | null; }
"#;

fn find<'a>(definitions: &'a [TypeDefinition], name: &str) -> &'a TypeDefinition {
    definitions
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| panic!("{name} should be parsed"))
}

#[test]
fn test_use_state_signature_with_overloads() {
    let parser = DeclarationParser::default();
    let api = parser
        .extract_api_signature(REACT_TYPES, "useState", "index.d.ts")
        .expect("useState should resolve");

    assert_eq!(api.name, "useState");
    assert_eq!(api.kind, DefinitionKind::Function);
    assert_eq!(api.parameters[0].name, "initialState");
    assert_eq!(
        api.parameters[0].description.as_deref(),
        Some("The value used on first render")
    );
    assert_eq!(
        api.description.as_deref(),
        Some("Returns a stateful value, and a function to update it.")
    );
    assert_eq!(api.examples, vec!["const [count, setCount] = useState(0);"]);
    assert_eq!(api.see_also, vec!["https://react.dev/reference/react/useState"]);
    assert_eq!(api.overloads.as_ref().map(Vec::len), Some(2));

    let related: Vec<&str> = api.related_types.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(related, vec!["Dispatch", "SetStateAction"]);
}

#[test]
fn test_single_declaration_has_no_overloads() {
    let text = "declare function useState<S>(initialState: S): [S, (value: S) => void];";
    let parser = DeclarationParser::default();
    let api = parser
        .extract_api_signature(text, "useState", "index.d.ts")
        .expect("useState should resolve");

    assert_eq!(api.parameters[0].name, "initialState");
    assert_eq!(api.parameters[0].type_annotation, "S");
    assert_eq!(api.generics, vec!["S"]);
    assert_eq!(api.return_type.as_deref(), Some("[S, (value: S) => void]"));
    assert_eq!(api.overloads, None);
    assert!(api.related_types.is_empty());
}

#[test]
fn test_exact_match_beats_substring() {
    let parser = DeclarationParser::default();
    let api = parser
        .extract_api_signature(REACT_TYPES, "REDUCER", "index.d.ts")
        .expect("Reducer should resolve");
    assert_eq!(api.name, "Reducer");
    assert_eq!(api.kind, DefinitionKind::Type);

    let api = parser
        .extract_api_signature(REACT_TYPES, "effect", "index.d.ts")
        .expect("substring should resolve");
    assert_eq!(api.name, "useEffect");

    assert!(parser
        .extract_api_signature(REACT_TYPES, "useTransition", "index.d.ts")
        .is_none());
}

#[test]
fn test_related_types_are_one_hop() {
    let parser = DeclarationParser::default();
    let api = parser
        .extract_api_signature(REACT_TYPES, "useEffect", "index.d.ts")
        .expect("useEffect should resolve");

    let related: Vec<&str> = api.related_types.iter().map(|r| r.name.as_str()).collect();
    // Destructor is only reachable through EffectCallback
    assert_eq!(related, vec!["EffectCallback", "DependencyList"]);
    assert!(api.parameters[1].optional);
}

#[test]
fn test_deprecation() {
    let parser = DeclarationParser::default();
    let api = parser
        .extract_api_signature(REACT_TYPES, "render", "index.d.ts")
        .expect("render should resolve");
    assert!(api.deprecated);
    assert_eq!(
        api.deprecation_message.as_deref(),
        Some("Use createRoot instead")
    );
    assert_eq!(api.description, None);
}

#[test]
fn test_interface_members_and_extends() {
    let parser = DeclarationParser::default();
    let result = parser.parse(REACT_TYPES, "index.d.ts");

    let element = find(&result.definitions, "ReactElement");
    assert_eq!(element.kind, DefinitionKind::Interface);
    assert_eq!(element.generics, vec!["P = any", "T = string"]);
    assert_eq!(element.members.len(), 3);

    let component = find(&result.definitions, "FunctionComponent");
    assert_eq!(component.extends, vec!["ComponentLifecycle"]);
    let display_name = component
        .members
        .iter()
        .find(|m| m.name == "displayName")
        .expect("displayName member");
    assert!(display_name.optional);
    assert!(!display_name.readonly);
    let default_props = component
        .members
        .iter()
        .find(|m| m.name == "defaultProps")
        .expect("defaultProps member");
    assert!(default_props.optional);
    assert!(default_props.readonly);
    assert_eq!(default_props.type_annotation, "Partial<P>");
    assert!(component.members.iter().any(|m| m.kind == MemberKind::Call));

    let lifecycle = find(&result.definitions, "ComponentLifecycle");
    assert_eq!(lifecycle.members[0].kind, MemberKind::Method);
    assert!(lifecycle.members[0].optional);
}

#[test]
fn test_class_members() {
    let parser = DeclarationParser::default();
    let result = parser.parse(REACT_TYPES, "index.d.ts");
    let class = find(&result.definitions, "Component");

    assert_eq!(class.kind, DefinitionKind::Class);
    assert_eq!(class.generics, vec!["P", "S"]);

    let props = class.members.iter().find(|m| m.name == "props").expect("props");
    assert_eq!(props.kind, MemberKind::Property);
    assert!(props.readonly);

    let state = class.members.iter().find(|m| m.name == "state").expect("state");
    assert!(!state.readonly);

    let set_state = class
        .members
        .iter()
        .find(|m| m.name == "setState")
        .expect("setState");
    assert_eq!(set_state.kind, MemberKind::Method);
    assert_eq!(set_state.type_annotation, "(state: S): void");

    let mounted = class
        .members
        .iter()
        .find(|m| m.name == "isMounted")
        .expect("isMounted");
    assert_eq!(mounted.kind, MemberKind::Accessor);
    assert!(mounted.readonly);
    assert_eq!(mounted.type_annotation, "boolean");
}

#[test]
fn test_enum_members() {
    let parser = DeclarationParser::default();
    let result = parser.parse(REACT_TYPES, "index.d.ts");
    let priority = find(&result.definitions, "Priority");

    assert_eq!(priority.kind, DefinitionKind::Enum);
    let members: Vec<(&str, &str)> = priority
        .members
        .iter()
        .map(|m| (m.name.as_str(), m.type_annotation.as_str()))
        .collect();
    assert_eq!(
        members,
        vec![("Immediate", "1"), ("Normal", "auto"), ("Idle", "\"idle\"")]
    );
    assert!(priority.members.iter().all(|m| m.readonly));
}

#[test]
fn test_variables() {
    let parser = DeclarationParser::default();
    let result = parser.parse(REACT_TYPES, "index.d.ts");

    let version = find(&result.definitions, "version");
    assert_eq!(version.kind, DefinitionKind::Constant);
    assert_eq!(version.signature, "const version: string");

    let create_ref = find(&result.definitions, "createRef");
    assert_eq!(create_ref.kind, DefinitionKind::Function);
    assert_eq!(create_ref.parameters[0].name, "initial");
    assert_eq!(create_ref.return_type.as_deref(), Some("RefObject<T>"));
    assert_eq!(create_ref.generics, vec!["T"]);

    let api = parser
        .extract_api_signature(REACT_TYPES, "createRef", "index.d.ts")
        .expect("createRef should resolve");
    assert_eq!(api.related_types[0].name, "RefObject");
}

#[test]
fn test_related_type_map_holds_type_like_definitions() {
    let parser = DeclarationParser::default();
    let result = parser.parse(REACT_TYPES, "index.d.ts");

    assert!(result.related_types.contains_key("ReactElement"));
    assert!(result.related_types.contains_key("Priority"));
    assert!(result.related_types.contains_key("Component"));
    assert!(!result.related_types.contains_key("useState"));
    assert!(result.errors.is_empty(), "{:?}", result.errors);
}

#[test]
fn test_search_ranks_described_function_first() {
    let text = r#"
/** Returns a stateful value. */
declare function useState<S>(initialState: S): [S, (value: S) => void];
declare function useReducer<S, A>(reducer: (s: S, a: A) => S, initial: S): [S, (a: A) => void];
"#;
    let parser = DeclarationParser::default();
    let hits = parser.search_apis(text, "use", "index.d.ts", 20);

    let names: Vec<&str> = hits.iter().map(|h| h.definition.name.as_str()).collect();
    assert_eq!(names, vec!["useState", "useReducer"]);
    assert_eq!(hits[0].score, 80 + 15 + 10);
    assert_eq!(hits[1].score, 80 + 15);
}

#[test]
fn test_search_requires_every_term() {
    let parser = DeclarationParser::default();
    let hits = parser.search_apis(REACT_TYPES, "use dispatch", "index.d.ts", 20);
    assert!(!hits.is_empty());
    for hit in &hits {
        let haystack = format!("{} {}", hit.definition.name, hit.definition.signature).to_lowercase();
        assert!(haystack.contains("use") && haystack.contains("dispatch"));
    }
    assert!(hits.iter().all(|h| h.definition.name != "useEffect"));
}

#[test]
fn test_search_scores_are_non_increasing_and_truncated() {
    let parser = DeclarationParser::default();
    let hits = parser.search_apis(REACT_TYPES, "e", "index.d.ts", 5);
    assert_eq!(hits.len(), 5);
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(parser.search_apis(REACT_TYPES, "   ", "index.d.ts", 5).is_empty());
}

#[test]
fn test_deprecated_scores_strictly_lower() {
    let parser = DeclarationParser::default();
    let result = parser.parse(REACT_TYPES, "index.d.ts");
    let current = find(&result.definitions, "useEffect").clone();
    let mut legacy = current.clone();
    legacy.deprecated = true;

    assert!(
        augments_declarations::score(&legacy, "useeffect")
            < augments_declarations::score(&current, "useeffect")
    );
}

#[test]
fn test_cache_identity_until_cleared() {
    let parser = DeclarationParser::default();
    let first = parser.parse(REACT_TYPES, "index.d.ts");
    let second = parser.parse(REACT_TYPES, "index.d.ts");
    assert!(Arc::ptr_eq(&first, &second));

    parser.clear_cache();
    let third = parser.parse(REACT_TYPES, "index.d.ts");
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
}

#[test]
fn test_cache_never_exceeds_capacity() {
    let parser = DeclarationParser::new(2);
    let a = parser.parse("declare const a: string;", "a.d.ts");
    let _b = parser.parse("declare const b: string;", "b.d.ts");
    let c = parser.parse("declare const c: string;", "c.d.ts");

    let stats = parser.cache_stats();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.capacity, 2);

    // "a" was the oldest entry and is parsed afresh
    assert!(!Arc::ptr_eq(&a, &parser.parse("declare const a: string;", "a.d.ts")));
    assert!(Arc::ptr_eq(&c, &parser.parse("declare const c: string;", "c.d.ts")));
}

#[test]
fn test_syntax_errors_do_not_lose_other_declarations() {
    let text = "declare function good(): void;\n%%%;\ninterface Ok { a: string }\n";
    let parser = DeclarationParser::default();
    let result = parser.parse(text, "broken.d.ts");

    assert!(!result.errors.is_empty());
    assert!(result.definitions.iter().any(|d| d.name == "good"));
    assert!(result.definitions.iter().any(|d| d.name == "Ok"));
}

#[test]
fn test_trailing_comment_stays_with_its_own_line() {
    let text = "declare function a(): void; // internal helper, do not use\n\
                declare function b(x: number): void;\n\
                // Adds one to a number.\n\
                declare function c(x: number): number;\n";
    let parser = DeclarationParser::default();
    let result = parser.parse(text, "index.d.ts");

    assert_eq!(find(&result.definitions, "b").description, None);
    assert_eq!(
        find(&result.definitions, "c").description.as_deref(),
        Some("Adds one to a number.")
    );
}

#[test]
fn test_namespace_declarations() {
    let text = r#"
declare namespace React {
    /** Generates a unique ID. */
    function useId(): string;
    interface Attributes { key?: string | null }
    const Fragment: symbol;
}
"#;
    let parser = DeclarationParser::default();
    let result = parser.parse(text, "index.d.ts");

    let use_id = find(&result.definitions, "useId");
    assert_eq!(use_id.description.as_deref(), Some("Generates a unique ID."));
    assert_eq!(find(&result.definitions, "Attributes").kind, DefinitionKind::Interface);
    assert_eq!(find(&result.definitions, "Fragment").kind, DefinitionKind::Constant);
}

#[test]
fn test_tsx_file_names_use_tsx_grammar() {
    let text = "export declare function Button(props: { label: string }): JSX.Element;";
    let parser = DeclarationParser::default();
    let result = parser.parse(text, "button.tsx");
    let button = find(&result.definitions, "Button");
    assert_eq!(button.parameters[0].type_annotation, "{ label: string }");
    assert_eq!(button.return_type.as_deref(), Some("JSX.Element"));
}
