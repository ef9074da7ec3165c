use repolens::parse_file;
use repolens::types::*;

fn parse(src: &str, ext: &str) -> ParsedFileResult {
    parse_file(src, ext, &format!("sample.{ext}"))
        .unwrap()
        .unwrap()
}

fn names(params: &[Parameter]) -> Vec<&str> {
    params.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_python_module() {
    let src = r#"
import os, sys as system
from typing import List, Optional as Opt
from .utils import *

class Animal(Base, Mixin):
    """An animal."""
    legs: int = 4

    def __init__(self, name):
        self.name = name

    @staticmethod
    def create(*args, **kwargs):
        pass

    async def speak(self, loud: bool = False):
        pass

def helper(a, b: int, c=1, *rest):
    pass
"#;
    let result = parse(src, "py");

    let imports = &result.imports;
    assert_eq!(imports.len(), 4);
    assert_eq!(imports[0].source, "os");
    assert_eq!(imports[0].kind, ImportKind::Namespace);
    assert_eq!(imports[1].imports[0].name, "sys");
    assert_eq!(imports[1].imports[0].alias.as_deref(), Some("system"));
    assert_eq!(imports[2].source, "typing");
    assert_eq!(imports[2].kind, ImportKind::Named);
    assert_eq!(imports[2].imports[1].alias.as_deref(), Some("Opt"));
    assert_eq!(imports[3].source, ".utils");
    assert_eq!(imports[3].imports[0].name, "*");

    assert_eq!(result.classes.len(), 1);
    let class = &result.classes[0];
    assert_eq!(class.name, "Animal");
    assert_eq!(class.extends.as_deref(), Some("Base"));
    assert_eq!(class.implements.as_deref(), Some(&["Mixin".to_string()][..]));
    assert_eq!(names(&class.constructor.as_ref().unwrap().parameters), ["self", "name"]);
    assert_eq!(class.properties.len(), 1);
    assert_eq!(class.properties[0].name, "legs");
    assert_eq!(class.properties[0].type_name.as_deref(), Some("int"));
    assert_eq!(class.properties[0].default_value.as_deref(), Some("4"));

    let methods: Vec<_> = class.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, ["create", "speak"]);
    assert!(class.methods[1].is_async);
    let create = &class.methods[0].parameters;
    assert_eq!(names(create), ["args", "kwargs"]);
    assert!(create.iter().all(|p| p.is_rest));

    // Methods are also reported in the flat function list.
    let functions: Vec<_> = result.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(functions, ["__init__", "create", "speak", "helper"]);

    let helper = &result.functions[3].parameters;
    assert_eq!(names(helper), ["a", "b", "c", "rest"]);
    assert_eq!(helper[1].type_name, "int");
    assert_eq!(helper[2].default_value.as_deref(), Some("1"));
    assert!(helper[3].is_rest);
}

#[test]
fn test_go_functions_and_imports() {
    let src = r#"
package main

import (
    "fmt"
    str "strings"
    _ "embed"
)

func Add(a, b int, rest ...int) (int, error) {
    return a + b, nil
}

func (s *Server) Start(ctx context.Context) error {
    return nil
}
"#;
    let result = parse(src, "go");

    let imports = &result.imports;
    assert_eq!(imports.len(), 3);
    assert_eq!(imports[0].source, "fmt");
    assert_eq!(imports[0].imports[0].name, "fmt");
    assert_eq!(imports[1].source, "strings");
    assert_eq!(imports[1].imports[0].alias.as_deref(), Some("str"));
    assert_eq!(imports[2].kind, ImportKind::SideEffect);
    assert!(imports[2].imports.is_empty());

    assert_eq!(result.functions.len(), 2);
    let add = &result.functions[0];
    assert_eq!(add.name, "Add");
    assert_eq!(names(&add.parameters), ["a", "b", "rest"]);
    assert_eq!(add.parameters[1].type_name, "int");
    assert!(add.parameters[2].is_rest);
    assert_eq!(add.return_type, "(int, error)");

    let start = &result.functions[1];
    assert_eq!(start.name, "Start");
    assert_eq!(names(&start.parameters), ["ctx"]);
    assert_eq!(start.parameters[0].type_name, "context.Context");
    assert_eq!(start.return_type, "error");
}

#[test]
fn test_java_class_and_interface() {
    let src = r#"
package com.example;

import java.util.List;
import java.io.*;

public abstract class Repo<T> extends Base implements Reader, Writer {
    private static final int MAX = 10;
    protected String name, alias;

    public Repo(String name) { this.name = name; }

    public static Repo<String> of(String... names) { return null; }
    abstract void flush();
}

interface Reader extends Closeable {
    int CHUNK = 4;
    String read(int n);
}
"#;
    let result = parse(src, "java");

    assert_eq!(result.imports.len(), 2);
    assert_eq!(result.imports[0].source, "java.util");
    assert_eq!(result.imports[0].imports[0].name, "List");
    assert_eq!(result.imports[1].kind, ImportKind::Namespace);
    assert_eq!(result.imports[1].source, "java.io");

    assert_eq!(result.classes.len(), 1);
    assert_eq!(result.interfaces.len(), 1);
    let repo = &result.classes[0];
    assert_eq!(repo.name, "Repo");
    assert!(repo.is_abstract);
    assert_eq!(repo.extends.as_deref(), Some("Base"));
    assert_eq!(
        repo.implements.as_deref(),
        Some(&["Reader".to_string(), "Writer".to_string()][..])
    );
    assert_eq!(repo.generic_types.as_deref(), Some(&["T".to_string()][..]));

    let props: Vec<_> = repo.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(props, ["MAX", "name", "alias"]);
    assert!(repo.properties[0].is_static && repo.properties[0].is_private);
    assert_eq!(repo.properties[0].type_name.as_deref(), Some("int"));
    assert_eq!(repo.properties[0].default_value.as_deref(), Some("10"));
    assert!(repo.properties[2].is_protected);

    assert_eq!(names(&repo.constructor.as_ref().unwrap().parameters), ["name"]);
    let of = &repo.methods[0];
    assert!(of.is_static);
    assert_eq!(of.return_type.as_deref(), Some("Repo<String>"));
    assert_eq!(names(&of.parameters), ["names"]);
    assert!(of.parameters[0].is_rest);
    assert_eq!(of.parameters[0].type_name, "String");
    assert!(repo.methods[1].is_abstract);

    let reader = &result.interfaces[0];
    assert_eq!(reader.name, "Reader");
    assert_eq!(reader.extends.as_deref(), Some(&["Closeable".to_string()][..]));
    let members: Vec<_> = reader
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.type_name.as_str()))
        .collect();
    assert_eq!(members, [("CHUNK", "int"), ("read", "String")]);
}

#[test]
fn test_c_functions_through_declarators() {
    let src = r#"
#include <stdio.h>

static int add(int a, int b) { return a + b; }

char *dup(const char *s, ...) { return 0; }
"#;
    let result = parse(src, "c");
    assert_eq!(result.functions.len(), 2);
    let add = &result.functions[0];
    assert_eq!(add.name, "add");
    assert_eq!(add.return_type, "int");
    assert_eq!(names(&add.parameters), ["a", "b"]);
    assert_eq!(add.parameters[0].type_name, "int");

    let dup = &result.functions[1];
    assert_eq!(dup.name, "dup");
    assert_eq!(dup.parameters[0].name, "s");
    assert!(dup.parameters[1].is_rest);
}

#[test]
fn test_cpp_header_uses_cpp_grammar() {
    let src = "namespace util { int clamp(int v, int lo = 0) { return v; } }";
    let result = parse(src, "h");
    assert_eq!(result.functions.len(), 1);
    let clamp = &result.functions[0];
    assert_eq!(clamp.name, "clamp");
    assert_eq!(clamp.parameters[1].default_value.as_deref(), Some("0"));
    assert!(clamp.parameters[1].is_optional);
}

#[test]
fn test_cpp_reference_and_pointer_returns() {
    let src = r#"
int& get(int idx) { return items[idx]; }
const std::string& name(const Account& account, const Options&) { return account.name; }
Node* Tree::find(int key) const { return nullptr; }
int** grid(int rows, int cols) { return 0; }
"#;
    let result = parse(src, "cpp");
    let signatures: Vec<_> = result
        .functions
        .iter()
        .map(|f| (f.name.as_str(), f.parameters.len()))
        .collect();
    assert_eq!(
        signatures,
        [("get", 1), ("name", 2), ("Tree::find", 1), ("grid", 2)]
    );
    assert_eq!(names(&result.functions[0].parameters), ["idx"]);
    assert_eq!(names(&result.functions[1].parameters), ["account", ""]);
}

#[test]
fn test_java_varargs_type() {
    let src = "class Sum { int total(int first, int... rest) { return 0; } }";
    let result = parse(src, "java");
    let params = &result.classes[0].methods[0].parameters;
    assert_eq!(names(params), ["first", "rest"]);
    assert_eq!(params[1].type_name, "int");
    assert!(params[1].is_rest);
}

#[test]
fn test_rust_items() {
    let src = r#"
/// Fetches a page.
pub async fn fetch(url: &str, retries: u32) -> Result<String, Error> { todo!() }

type Map<K> = HashMap<K, String>;

impl Client {
    fn new(&self) -> Self { Self }
}
"#;
    let result = parse(src, "rs");

    assert_eq!(result.functions.len(), 2);
    assert_eq!(result.type_aliases.len(), 1);
    let fetch = &result.functions[0];
    assert_eq!(fetch.name, "fetch");
    assert!(fetch.is_async);
    assert_eq!(names(&fetch.parameters), ["url", "retries"]);
    assert_eq!(fetch.parameters[0].type_name, "&str");
    assert_eq!(fetch.return_type, "Result<String, Error>");
    assert_eq!(fetch.comments[0].text, "Fetches a page.");

    assert_eq!(result.functions[1].name, "new");
    assert_eq!(result.functions[1].parameters[0].name, "self");

    let alias = &result.type_aliases[0];
    assert_eq!(alias.name, "Map");
    assert_eq!(alias.type_text, "HashMap<K, String>");
    assert_eq!(alias.generic_types.as_deref(), Some(&["K".to_string()][..]));
}

#[test]
fn test_ruby_class() {
    let src = r#"
class Dog < Animal
  def initialize(name, age = 1)
    @name = name
  end

  def self.create(*args)
  end

  def bark
  end
end
"#;
    let result = parse(src, "rb");
    let classes: Vec<_> = result.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(classes, ["Dog"]);
    let dog = &result.classes[0];
    assert_eq!(dog.name, "Dog");
    assert_eq!(dog.extends.as_deref(), Some("Animal"));
    let ctor = dog.constructor.as_ref().unwrap();
    assert_eq!(names(&ctor.parameters), ["name", "age"]);
    assert!(ctor.parameters[1].is_optional);

    let methods: Vec<_> = dog.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, ["create", "bark"]);
    assert!(dog.methods[0].is_static);
    assert!(dog.methods[0].parameters[0].is_rest);
    assert_eq!(result.functions.len(), 3);
}

#[test]
fn test_php_declarations() {
    let src = r#"<?php
function greet(string $name, int ...$ids): string { return $name; }

abstract class Base extends Model implements JsonSerializable {
    private static $count = 0;
    public function __construct(private int $id) {}
    public static function make(): static {}
}

interface Shape { public function area(): float; }
"#;
    let result = parse(src, "php");

    assert_eq!(result.functions.len(), 1);
    assert_eq!(result.classes.len(), 1);
    assert_eq!(result.interfaces.len(), 1);
    let greet = &result.functions[0];
    assert_eq!(greet.name, "greet");
    assert_eq!(names(&greet.parameters), ["$name", "$ids"]);
    assert_eq!(greet.parameters[0].type_name, "string");
    assert!(greet.parameters[1].is_rest);
    assert_eq!(greet.return_type, "string");

    let base = &result.classes[0];
    assert!(base.is_abstract);
    assert_eq!(base.extends.as_deref(), Some("Model"));
    assert_eq!(
        base.implements.as_deref(),
        Some(&["JsonSerializable".to_string()][..])
    );
    assert_eq!(base.properties[0].name, "$count");
    assert!(base.properties[0].is_static && base.properties[0].is_private);
    assert_eq!(names(&base.constructor.as_ref().unwrap().parameters), ["$id"]);
    assert_eq!(base.methods[0].name, "make");
    assert!(base.methods[0].is_static);

    let shape = &result.interfaces[0];
    assert_eq!(shape.properties[0].name, "area");
    assert_eq!(shape.properties[0].type_name, "float");
}

#[test]
fn test_csharp_class_and_interface() {
    let src = r#"
using System;
namespace App {
    public class Service : BaseService, IDisposable {
        private readonly int _count = 0;
        public string Name { get; set; }
        public Service(int count) { }
        public static async Task<int> RunAsync(string input, int retries = 3) { return 0; }
        public void Log(string format, params object[] args) { }
    }
    public interface IShape : IBase { double Area(); }
}
"#;
    let result = parse(src, "cs");

    assert_eq!(result.classes.len(), 1);
    assert_eq!(result.interfaces.len(), 1);
    let service = &result.classes[0];
    assert_eq!(service.name, "Service");
    assert_eq!(service.extends.as_deref(), Some("BaseService"));
    assert_eq!(service.implements.as_deref(), Some(&["IDisposable".to_string()][..]));

    let props: Vec<_> = service.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(props, ["_count", "Name"]);
    assert!(service.properties[0].is_readonly && service.properties[0].is_private);
    assert_eq!(service.properties[1].type_name.as_deref(), Some("string"));

    assert_eq!(names(&service.constructor.as_ref().unwrap().parameters), ["count"]);
    let run = &service.methods[0];
    assert_eq!(run.name, "RunAsync");
    assert!(run.is_static && run.is_async);
    assert_eq!(names(&run.parameters), ["input", "retries"]);
    assert!(run.parameters[1].is_optional);

    let log = &service.methods[1].parameters;
    assert_eq!(names(log), ["format", "args"]);
    assert!(!log[0].is_rest);
    assert!(log[1].is_rest);
    assert_eq!(log[1].type_name, "object[]");

    let shape = &result.interfaces[0];
    assert_eq!(shape.name, "IShape");
    assert_eq!(shape.extends.as_deref(), Some(&["IBase".to_string()][..]));
    assert_eq!(shape.properties[0].name, "Area");
}

#[test]
fn test_bash_functions() {
    let result = parse("greet() { echo hi; }\n\nfunction deploy {\n  :\n}\n", "sh");
    let fns: Vec<_> = result.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fns, ["greet", "deploy"]);
    assert!(result.functions[0].parameters.is_empty());
}

#[test]
fn test_markup_grammars_parse_but_extract_nothing() {
    let cases = [
        ("<html><body><script>function f() {}</script></body></html>", "html"),
        ("{\"name\": \"repolens\", \"version\": 1}", "json"),
        ("name: repolens\nitems:\n  - a\n  - b\n", "yaml"),
        ("body { color: red; }", "css"),
    ];
    for (src, ext) in cases {
        let result = parse(src, ext);
        assert!(result.is_empty(), "{ext} should extract nothing");
    }
}
