//! Reference implementations shown in the code pane
//!
//! Only the Rust listings are kept in sync with the adapters; the Python and
//! JavaScript versions are presentational.

use crate::adapters::Algorithm;
use crate::trace::StepKind;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Rust,
    Python,
    JavaScript,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Rust, Language::Python, Language::JavaScript];

    pub fn name(self) -> &'static str {
        match self {
            Language::Rust => "Rust",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Language::Rust => Language::Python,
            Language::Python => Language::JavaScript,
            Language::JavaScript => Language::Rust,
        }
    }

    /// Words the code pane renders as keywords
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Language::Rust => &[
                "fn", "let", "mut", "if", "else", "while", "for", "in", "loop", "return", "break",
                "match", "Some", "None", "pub", "usize", "f64", "bool", "Vec", "Option",
            ],
            Language::Python => &[
                "def", "if", "elif", "else", "while", "for", "in", "return", "break", "not",
                "and", "or", "None", "True", "False", "range", "len",
            ],
            Language::JavaScript => &[
                "function", "const", "let", "if", "else", "while", "for", "of", "return",
                "break", "null", "true", "false", "new",
            ],
        }
    }

    /// Line comment prefix
    pub fn comment(self) -> &'static str {
        match self {
            Language::Python => "#",
            Language::Rust | Language::JavaScript => "//",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn snippet(algorithm: Algorithm, language: Language) -> &'static str {
    use Algorithm::*;
    use Language::*;
    match (algorithm, language) {
        (BubbleSort, Rust) => BUBBLE_RS,
        (BubbleSort, Python) => BUBBLE_PY,
        (BubbleSort, JavaScript) => BUBBLE_JS,
        (SelectionSort, Rust) => SELECTION_RS,
        (SelectionSort, Python) => SELECTION_PY,
        (SelectionSort, JavaScript) => SELECTION_JS,
        (InsertionSort, Rust) => INSERTION_RS,
        (InsertionSort, Python) => INSERTION_PY,
        (InsertionSort, JavaScript) => INSERTION_JS,
        (QuickSort, Rust) => QUICK_RS,
        (QuickSort, Python) => QUICK_PY,
        (QuickSort, JavaScript) => QUICK_JS,
        (MergeSort, Rust) => MERGE_RS,
        (MergeSort, Python) => MERGE_PY,
        (MergeSort, JavaScript) => MERGE_JS,
        (LinearSearch, Rust) => LINEAR_RS,
        (LinearSearch, Python) => LINEAR_PY,
        (LinearSearch, JavaScript) => LINEAR_JS,
        (BinarySearch, Rust) => BINARY_RS,
        (BinarySearch, Python) => BINARY_PY,
        (BinarySearch, JavaScript) => BINARY_JS,
        (Bfs, Rust) => BFS_RS,
        (Bfs, Python) => BFS_PY,
        (Bfs, JavaScript) => BFS_JS,
        (Dfs, Rust) => DFS_RS,
        (Dfs, Python) => DFS_PY,
        (Dfs, JavaScript) => DFS_JS,
        (TreeInorder, Rust) => INORDER_RS,
        (TreeInorder, Python) => INORDER_PY,
        (TreeInorder, JavaScript) => INORDER_JS,
        (TreePreorder, Rust) => PREORDER_RS,
        (TreePreorder, Python) => PREORDER_PY,
        (TreePreorder, JavaScript) => PREORDER_JS,
        (TreePostorder, Rust) => POSTORDER_RS,
        (TreePostorder, Python) => POSTORDER_PY,
        (TreePostorder, JavaScript) => POSTORDER_JS,
        (BstInsert, Rust) => BST_INSERT_RS,
        (BstInsert, Python) => BST_INSERT_PY,
        (BstInsert, JavaScript) => BST_INSERT_JS,
        (BstSearch, Rust) => BST_SEARCH_RS,
        (BstSearch, Python) => BST_SEARCH_PY,
        (BstSearch, JavaScript) => BST_SEARCH_JS,
        (Stack, Rust) => STACK_RS,
        (Stack, Python) => STACK_PY,
        (Stack, JavaScript) => STACK_JS,
        (Queue, Rust) => QUEUE_RS,
        (Queue, Python) => QUEUE_PY,
        (Queue, JavaScript) => QUEUE_JS,
        (LinkedList, Rust) => LIST_RS,
        (LinkedList, Python) => LIST_PY,
        (LinkedList, JavaScript) => LIST_JS,
    }
}

/// 1-based line of `code` most related to a step of `kind`
pub fn focus_line(code: &str, kind: StepKind) -> Option<usize> {
    let needles: &[&str] = match kind {
        StepKind::Compare => &["if "],
        StepKind::Swap => &["swap(", "# swap", "// swap"],
        StepKind::Overwrite => &["] = "],
        StepKind::InsertAt => &["] = ", ".push", ".append", "Node("],
        StepKind::Visit => &["order.push", "order.append", "visit("],
        StepKind::Found => &["return Some", "return i", "return mid"],
        StepKind::NotFound => &["None", "return -1"],
        StepKind::RangeMark | StepKind::Custom(_) => &["mid =", "pivot", "merge("],
        StepKind::Remove => &[".pop", ".remove(", ".shift(", "popleft"],
        StepKind::Start | StepKind::Complete => &[],
    };
    code.lines()
        .position(|line| needles.iter().any(|needle| line.contains(needle)))
        .map(|index| index + 1)
}

const BUBBLE_RS: &str = "fn bubble_sort(arr: &mut [f64]) {
    let n = arr.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - pass - 1 {
            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}";

const BUBBLE_PY: &str = "def bubble_sort(arr):
    n = len(arr)
    for p in range(n - 1):
        swapped = False
        for j in range(n - p - 1):
            if arr[j] > arr[j + 1]:
                arr[j], arr[j + 1] = arr[j + 1], arr[j]  # swap
                swapped = True
        if not swapped:
            break";

const BUBBLE_JS: &str = "function bubbleSort(arr) {
  const n = arr.length;
  for (let p = 0; p < n - 1; p++) {
    let swapped = false;
    for (let j = 0; j < n - p - 1; j++) {
      if (arr[j] > arr[j + 1]) {
        [arr[j], arr[j + 1]] = [arr[j + 1], arr[j]]; // swap
        swapped = true;
      }
    }
    if (!swapped) break;
  }
}";

const SELECTION_RS: &str = "fn selection_sort(arr: &mut [f64]) {
    let n = arr.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if arr[j] < arr[min] {
                min = j;
            }
        }
        if min != i {
            arr.swap(i, min);
        }
    }
}";

const SELECTION_PY: &str = "def selection_sort(arr):
    n = len(arr)
    for i in range(n - 1):
        low = i
        for j in range(i + 1, n):
            if arr[j] < arr[low]:
                low = j
        if low != i:
            arr[i], arr[low] = arr[low], arr[i]  # swap";

const SELECTION_JS: &str = "function selectionSort(arr) {
  for (let i = 0; i < arr.length - 1; i++) {
    let min = i;
    for (let j = i + 1; j < arr.length; j++) {
      if (arr[j] < arr[min]) min = j;
    }
    if (min !== i) {
      [arr[i], arr[min]] = [arr[min], arr[i]]; // swap
    }
  }
}";

const INSERTION_RS: &str = "fn insertion_sort(arr: &mut [f64]) {
    for i in 1..arr.len() {
        let key = arr[i];
        let mut hole = i;
        while hole > 0 {
            if arr[hole - 1] <= key {
                break;
            }
            arr[hole] = arr[hole - 1];
            hole -= 1;
        }
        arr[hole] = key;
    }
}";

const INSERTION_PY: &str = "def insertion_sort(arr):
    for i in range(1, len(arr)):
        key = arr[i]
        j = i - 1
        while j >= 0:
            if arr[j] <= key:
                break
            arr[j + 1] = arr[j]
            j -= 1
        arr[j + 1] = key";

const INSERTION_JS: &str = "function insertionSort(arr) {
  for (let i = 1; i < arr.length; i++) {
    const key = arr[i];
    let j = i - 1;
    while (j >= 0) {
      if (arr[j] <= key) break;
      arr[j + 1] = arr[j];
      j--;
    }
    arr[j + 1] = key;
  }
}";

const QUICK_RS: &str = "fn quick_sort(arr: &mut [f64], low: usize, high: usize) {
    if low >= high {
        return;
    }
    let p = partition(arr, low, high);
    if p > low {
        quick_sort(arr, low, p - 1);
    }
    quick_sort(arr, p + 1, high);
}

fn partition(arr: &mut [f64], low: usize, high: usize) -> usize {
    let pivot = arr[high];
    let mut store = low;
    for j in low..high {
        if arr[j] <= pivot {
            arr.swap(store, j);
            store += 1;
        }
    }
    arr.swap(store, high);
    store
}";

const QUICK_PY: &str = "def quick_sort(arr, low, high):
    if low < high:
        p = partition(arr, low, high)
        quick_sort(arr, low, p - 1)
        quick_sort(arr, p + 1, high)

def partition(arr, low, high):
    pivot = arr[high]
    i = low
    for j in range(low, high):
        if arr[j] <= pivot:
            arr[i], arr[j] = arr[j], arr[i]  # swap
            i += 1
    arr[i], arr[high] = arr[high], arr[i]  # swap
    return i";

const QUICK_JS: &str = "function quickSort(arr, low, high) {
  if (low < high) {
    const p = partition(arr, low, high);
    quickSort(arr, low, p - 1);
    quickSort(arr, p + 1, high);
  }
}

function partition(arr, low, high) {
  const pivot = arr[high];
  let i = low;
  for (let j = low; j < high; j++) {
    if (arr[j] <= pivot) {
      [arr[i], arr[j]] = [arr[j], arr[i]]; // swap
      i++;
    }
  }
  [arr[i], arr[high]] = [arr[high], arr[i]]; // swap
  return i;
}";

const MERGE_RS: &str = "fn merge_sort(arr: &mut [f64]) {
    if arr.len() <= 1 {
        return;
    }
    let mid = arr.len() / 2;
    merge_sort(&mut arr[..mid]);
    merge_sort(&mut arr[mid..]);
    merge(arr, mid);
}

fn merge(arr: &mut [f64], mid: usize) {
    let mut merged = Vec::with_capacity(arr.len());
    let (mut i, mut j) = (0, mid);
    while i < mid && j < arr.len() {
        if arr[i] <= arr[j] {
            merged.push(arr[i]);
            i += 1;
        } else {
            merged.push(arr[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&arr[i..mid]);
    merged.extend_from_slice(&arr[j..]);
    for (k, value) in merged.into_iter().enumerate() {
        arr[k] = value;
    }
}";

const MERGE_PY: &str = "def merge_sort(arr):
    if len(arr) <= 1:
        return arr
    mid = len(arr) // 2
    return merge(merge_sort(arr[:mid]), merge_sort(arr[mid:]))

def merge(left, right):
    out, i, j = [], 0, 0
    while i < len(left) and j < len(right):
        if left[i] <= right[j]:
            out.append(left[i]); i += 1
        else:
            out.append(right[j]); j += 1
    return out + left[i:] + right[j:]";

const MERGE_JS: &str = "function mergeSort(arr) {
  if (arr.length <= 1) return arr;
  const mid = Math.floor(arr.length / 2);
  return merge(mergeSort(arr.slice(0, mid)), mergeSort(arr.slice(mid)));
}

function merge(left, right) {
  const out = [];
  let i = 0, j = 0;
  while (i < left.length && j < right.length) {
    if (left[i] <= right[j]) out.push(left[i++]);
    else out.push(right[j++]);
  }
  return out.concat(left.slice(i), right.slice(j));
}";

const LINEAR_RS: &str = "fn linear_search(arr: &[f64], target: f64) -> Option<usize> {
    for (i, value) in arr.iter().enumerate() {
        if *value == target {
            return Some(i);
        }
    }
    None
}";

const LINEAR_PY: &str = "def linear_search(arr, target):
    for i, value in enumerate(arr):
        if value == target:
            return i
    return -1";

const LINEAR_JS: &str = "function linearSearch(arr, target) {
  for (let i = 0; i < arr.length; i++) {
    if (arr[i] === target) return i;
  }
  return -1;
}";

const BINARY_RS: &str = "fn binary_search(arr: &[f64], target: f64) -> Option<usize> {
    let (mut low, mut high) = (0isize, arr.len() as isize - 1);
    while low <= high {
        let mid = ((low + high) / 2) as usize;
        if arr[mid] == target {
            return Some(mid);
        } else if arr[mid] < target {
            low = mid as isize + 1;
        } else {
            high = mid as isize - 1;
        }
    }
    None
}";

const BINARY_PY: &str = "def binary_search(arr, target):
    low, high = 0, len(arr) - 1
    while low <= high:
        mid = (low + high) // 2
        if arr[mid] == target:
            return mid
        elif arr[mid] < target:
            low = mid + 1
        else:
            high = mid - 1
    return -1";

const BINARY_JS: &str = "function binarySearch(arr, target) {
  let low = 0, high = arr.length - 1;
  while (low <= high) {
    const mid = Math.floor((low + high) / 2);
    if (arr[mid] === target) return mid;
    if (arr[mid] < target) low = mid + 1;
    else high = mid - 1;
  }
  return -1;
}";

const BFS_RS: &str = "fn bfs(adj: &[Vec<usize>], start: usize) -> Vec<usize> {
    let mut seen = vec![false; adj.len()];
    let mut queue = VecDeque::from([start]);
    let mut order = Vec::new();
    seen[start] = true;
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &next in &adj[node] {
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    order
}";

const BFS_PY: &str = "def bfs(adj, start):
    seen, queue, order = {start}, deque([start]), []
    while queue:
        node = queue.popleft()
        order.append(node)
        for nxt in adj[node]:
            if nxt not in seen:
                seen.add(nxt)
                queue.append(nxt)
    return order";

const BFS_JS: &str = "function bfs(adj, start) {
  const seen = new Set([start]);
  const queue = [start];
  const order = [];
  while (queue.length) {
    const node = queue.shift();
    order.push(node);
    for (const next of adj[node]) {
      if (!seen.has(next)) {
        seen.add(next);
        queue.push(next);
      }
    }
  }
  return order;
}";

const DFS_RS: &str = "fn dfs(adj: &[Vec<usize>], node: usize, seen: &mut [bool], order: &mut Vec<usize>) {
    seen[node] = true;
    order.push(node);
    for &next in &adj[node] {
        if !seen[next] {
            dfs(adj, next, seen, order);
        }
    }
}";

const DFS_PY: &str = "def dfs(adj, node, seen, order):
    seen.add(node)
    order.append(node)
    for nxt in adj[node]:
        if nxt not in seen:
            dfs(adj, nxt, seen, order)";

const DFS_JS: &str = "function dfs(adj, node, seen, order) {
  seen.add(node);
  order.push(node);
  for (const next of adj[node]) {
    if (!seen.has(next)) dfs(adj, next, seen, order);
  }
}";

const INORDER_RS: &str = "fn inorder(node: Option<&Node>, order: &mut Vec<f64>) {
    if let Some(n) = node {
        inorder(n.left.as_deref(), order);
        order.push(n.value);
        inorder(n.right.as_deref(), order);
    }
}";

const INORDER_PY: &str = "def inorder(node, order):
    if node:
        inorder(node.left, order)
        order.append(node.value)
        inorder(node.right, order)";

const INORDER_JS: &str = "function inorder(node, order) {
  if (!node) return;
  inorder(node.left, order);
  order.push(node.value);
  inorder(node.right, order);
}";

const PREORDER_RS: &str = "fn preorder(node: Option<&Node>, order: &mut Vec<f64>) {
    if let Some(n) = node {
        order.push(n.value);
        preorder(n.left.as_deref(), order);
        preorder(n.right.as_deref(), order);
    }
}";

const PREORDER_PY: &str = "def preorder(node, order):
    if node:
        order.append(node.value)
        preorder(node.left, order)
        preorder(node.right, order)";

const PREORDER_JS: &str = "function preorder(node, order) {
  if (!node) return;
  order.push(node.value);
  preorder(node.left, order);
  preorder(node.right, order);
}";

const POSTORDER_RS: &str = "fn postorder(node: Option<&Node>, order: &mut Vec<f64>) {
    if let Some(n) = node {
        postorder(n.left.as_deref(), order);
        postorder(n.right.as_deref(), order);
        order.push(n.value);
    }
}";

const POSTORDER_PY: &str = "def postorder(node, order):
    if node:
        postorder(node.left, order)
        postorder(node.right, order)
        order.append(node.value)";

const POSTORDER_JS: &str = "function postorder(node, order) {
  if (!node) return;
  postorder(node.left, order);
  postorder(node.right, order);
  order.push(node.value);
}";

const BST_INSERT_RS: &str = "fn insert(node: &mut Option<Box<Node>>, value: f64) {
    match node {
        None => *node = Some(Box::new(Node::leaf(value))),
        Some(n) => {
            if value < n.value {
                insert(&mut n.left, value);
            } else if value > n.value {
                insert(&mut n.right, value);
            }
        }
    }
}";

const BST_INSERT_PY: &str = "def insert(node, value):
    if node is None:
        return Node(value)
    if value < node.value:
        node.left = insert(node.left, value)
    elif value > node.value:
        node.right = insert(node.right, value)
    return node";

const BST_INSERT_JS: &str = "function insert(node, value) {
  if (!node) return new Node(value);
  if (value < node.value) node.left = insert(node.left, value);
  else if (value > node.value) node.right = insert(node.right, value);
  return node;
}";

const BST_SEARCH_RS: &str = "fn search(mut node: Option<&Node>, value: f64) -> Option<&Node> {
    while let Some(n) = node {
        if value == n.value {
            return Some(n);
        }
        node = if value < n.value { n.left.as_deref() } else { n.right.as_deref() };
    }
    None
}";

const BST_SEARCH_PY: &str = "def search(node, value):
    while node:
        if value == node.value:
            return node
        node = node.left if value < node.value else node.right
    return None";

const BST_SEARCH_JS: &str = "function search(node, value) {
  while (node) {
    if (value === node.value) return node;
    node = value < node.value ? node.left : node.right;
  }
  return null;
}";

const STACK_RS: &str = "fn push(stack: &mut Vec<String>, value: String) {
    stack.push(value);
}

fn pop(stack: &mut Vec<String>) -> Option<String> {
    stack.pop()
}

fn peek(stack: &[String]) -> Option<&String> {
    stack.last()
}";

const STACK_PY: &str = "def push(stack, value):
    stack.append(value)

def pop(stack):
    return stack.pop()

def peek(stack):
    return stack[-1]";

const STACK_JS: &str = "function push(stack, value) {
  stack.push(value);
}

function pop(stack) {
  return stack.pop();
}

function peek(stack) {
  return stack[stack.length - 1];
}";

const QUEUE_RS: &str = "fn enqueue(queue: &mut VecDeque<String>, value: String) {
    queue.push_back(value);
}

fn dequeue(queue: &mut VecDeque<String>) -> Option<String> {
    queue.pop_front()
}

fn peek(queue: &VecDeque<String>) -> Option<&String> {
    queue.front()
}";

const QUEUE_PY: &str = "def enqueue(queue, value):
    queue.append(value)

def dequeue(queue):
    return queue.popleft()

def peek(queue):
    return queue[0]";

const QUEUE_JS: &str = "function enqueue(queue, value) {
  queue.push(value);
}

function dequeue(queue) {
  return queue.shift();
}

function peek(queue) {
  return queue[0];
}";

const LIST_RS: &str = "fn insert_at(list: &mut LinkedList, index: usize, value: String) {
    let mut link = &mut list.head;
    for _ in 0..index {
        link = &mut link.as_mut().unwrap().next;
    }
    let next = link.take();
    *link = Some(Box::new(Node { value, next }));
}

fn find(list: &LinkedList, value: &str) -> Option<usize> {
    let mut node = list.head.as_deref();
    let mut i = 0;
    while let Some(n) = node {
        if n.value == value {
            return Some(i);
        }
        node = n.next.as_deref();
        i += 1;
    }
    None
}";

const LIST_PY: &str = "def insert_at(lst, index, value):
    if index == 0:
        lst.head = Node(value, lst.head)
        return
    prev = lst.head
    for _ in range(index - 1):
        prev = prev.next
    prev.next = Node(value, prev.next)

def find(lst, value):
    node, i = lst.head, 0
    while node:
        if node.value == value:
            return i
        node, i = node.next, i + 1
    return -1";

const LIST_JS: &str = "function insertAt(list, index, value) {
  if (index === 0) {
    list.head = { value, next: list.head };
    return;
  }
  let prev = list.head;
  for (let i = 0; i < index - 1; i++) prev = prev.next;
  prev.next = { value, next: prev.next };
}

function find(list, value) {
  let node = list.head;
  for (let i = 0; node; i++, node = node.next) {
    if (node.value === value) return i;
  }
  return -1;
}";
