use super::grapheme;

struct TrieNode {
    start: usize,
    len: usize,
    capacity: usize,
    is_terminal: bool,
}

// Keyword set stored as a char trie so that phrases sharing a prefix
// ("Scenario", "Scenario Outline") resolve to the longest whole-word match.
pub struct Trie {
    nodes: Vec<TrieNode>,
    data: Vec<(char, usize)>,
}

impl Trie {
    pub fn new() -> Self {
        let mut trie = Self {
            nodes: Vec::new(),
            data: Vec::new(),
        };

        trie.clear();
        trie
    }

    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let mut index = 0;

        for c in text.chars() {
            index = self.get_or_add_child(index, c);
        }

        self.nodes[index].is_terminal = true;
    }

    pub fn contains(&self, text: &str) -> bool {
        let mut index = 0;

        for c in text.chars() {
            let Some(child_index) = self.get_child(index, c) else {
                return false;
            };

            index = child_index;
        }

        self.nodes[index].is_terminal
    }

    // Returns the end of the longest entry starting at `start` that is
    // followed by a non-word grapheme (or the end of the text).
    pub fn longest_match(&self, text: &str, start: usize) -> Option<usize> {
        let mut index = 0;
        let mut longest = None;

        for (offset, c) in text.get(start..)?.char_indices() {
            let Some(child_index) = self.get_child(index, c) else {
                break;
            };

            index = child_index;

            let end = start + offset + c.len_utf8();

            if self.nodes[index].is_terminal && !grapheme::is_word(grapheme::at(end, text)) {
                longest = Some(end);
            }
        }

        longest
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.data.clear();

        let root = self.new_node();
        self.nodes.push(root);
    }

    fn new_node(&mut self) -> TrieNode {
        let start = self.data.len();
        let capacity = 4;

        self.data.resize(start + capacity, (' ', 0));

        TrieNode {
            start,
            len: 0,
            capacity,
            is_terminal: false,
        }
    }

    fn add_child_to_node(&mut self, index: usize, key: char) -> usize {
        let child_node = self.new_node();
        let child_index = self.nodes.len();
        self.nodes.push(child_node);

        let node = &mut self.nodes[index];

        if node.len >= node.capacity {
            let new_start = self.data.len();
            let new_capacity = node.capacity * 2;

            self.data.resize(new_start + new_capacity, (' ', 0));
            self.data
                .copy_within(node.start..node.start + node.capacity, new_start);

            node.start = new_start;
            node.capacity = new_capacity;
        }

        self.data[node.start + node.len] = (key, child_index);
        node.len += 1;

        child_index
    }

    fn get_child(&self, index: usize, key: char) -> Option<usize> {
        let node = &self.nodes[index];

        self.data[node.start..node.start + node.len]
            .iter()
            .find(|child| child.0 == key)
            .map(|child| child.1)
    }

    fn get_or_add_child(&mut self, index: usize, key: char) -> usize {
        match self.get_child(index, key) {
            Some(child_index) => child_index,
            None => self.add_child_to_node(index, key),
        }
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}
