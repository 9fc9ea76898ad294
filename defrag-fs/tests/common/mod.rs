//! Builds fragmented images: every block a file uses, data or index, is taken
//! from a scrambled order across the whole data region.

#![allow(dead_code)]

use defrag_fs::layout::{DIRECT_COUNT, INDIRECT_COUNT, INODE_SIZE};
use defrag_fs::{BOOT_SIZE, DiskInode, Endian, HEADER_END, IndexBlock, SuperBlock, UNUSED};

pub struct Builder {
    image: Vec<u8>,
    endian: Endian,
    block_size: usize,
    inode_start: usize,
    data_start: usize,
    inodes: usize,
    next_inode: usize,
    /// Unused blocks, taken from the back
    pool: Vec<i32>,
}

impl Builder {
    pub fn new(block_size: usize, inodes: usize, data_blocks: usize, endian: Endian) -> Self {
        let inode_blocks = (inodes * INODE_SIZE).div_ceil(block_size);
        let swap_blocks = 2;
        let total = HEADER_END + (inode_blocks + data_blocks + swap_blocks) * block_size;

        let mut image = vec![0u8; total];
        for (i, byte) in image[..BOOT_SIZE].iter_mut().enumerate() {
            *byte = i as u8;
        }
        image[BOOT_SIZE + SuperBlock::SIZE..HEADER_END].fill(0x42);
        image[total - swap_blocks * block_size..].fill(0x5A);
        SuperBlock {
            block_size: block_size as i32,
            inode_offset: 0,
            data_offset: inode_blocks as i32,
            swap_offset: (inode_blocks + data_blocks) as i32,
            free_inode: 17,
            free_block: 3,
        }
        .encode(&mut image[BOOT_SIZE..], endian);

        // Garbage everywhere a block has not been written
        let data_start = HEADER_END + inode_blocks * block_size;
        for (i, byte) in image[data_start..total - swap_blocks * block_size]
            .iter_mut()
            .enumerate()
        {
            *byte = (i * 7 + 3) as u8;
        }

        Self {
            image,
            endian,
            block_size,
            inode_start: HEADER_END,
            data_start,
            inodes,
            next_inode: 0,
            pool: scrambled(data_blocks),
        }
    }

    pub fn per_block(&self) -> usize {
        self.block_size / 4
    }

    /// Adds a live file holding `content` and returns its inode number.
    pub fn file(&mut self, content: &[u8]) -> usize {
        let mut inode = blank_inode(content.len() as i32);
        let mut chunks: Vec<&[u8]> = content.chunks(self.block_size).collect();
        chunks.reverse();

        self.fill_slots(&mut inode.direct, 0, &mut chunks);
        self.fill_slots(&mut inode.indirect, 1, &mut chunks);
        self.fill_slots(std::slice::from_mut(&mut inode.indirect2), 2, &mut chunks);
        self.fill_slots(std::slice::from_mut(&mut inode.indirect3), 3, &mut chunks);
        assert!(chunks.is_empty(), "file too large for the test geometry");

        self.inode(inode)
    }

    /// Adds an inode with the given record as is.
    pub fn inode(&mut self, inode: DiskInode) -> usize {
        let index = self.next_inode;
        assert!(index < self.inodes, "inode table full");
        self.next_inode += 1;

        let start = self.inode_start + index * INODE_SIZE;
        inode.encode(&mut self.image[start..start + INODE_SIZE], self.endian);
        index
    }

    /// Takes one block out of the pool without using it.
    pub fn waste(&mut self) -> i32 {
        self.pool.pop().expect("data region exhausted")
    }

    pub fn build(self) -> Vec<u8> {
        self.image
    }

    fn fill_slots(&mut self, slots: &mut [i32], depth: u32, chunks: &mut Vec<&[u8]>) {
        for slot in slots {
            *slot = if chunks.is_empty() {
                UNUSED
            } else {
                self.node(depth, chunks)
            };
        }
    }

    fn node(&mut self, depth: u32, chunks: &mut Vec<&[u8]>) -> i32 {
        let id = self.waste();
        let start = self.data_start + id as usize * self.block_size;

        if depth == 0 {
            let chunk = chunks.pop().unwrap();
            let block = &mut self.image[start..start + self.block_size];
            block[..chunk.len()].copy_from_slice(chunk);
        } else {
            let mut entries = Vec::new();
            while !chunks.is_empty() && entries.len() < self.per_block() {
                entries.push(self.node(depth - 1, chunks));
            }
            IndexBlock::write(
                &mut self.image[start..start + self.block_size],
                &entries,
                self.endian,
            );
        }

        id
    }
}

pub fn blank_inode(size: i32) -> DiskInode {
    DiskInode {
        protect: 0o644,
        nlink: 1,
        size,
        uid: 1000,
        gid: 1000,
        ctime: 1_700_000_000,
        mtime: 1_700_000_001,
        atime: 1_700_000_002,
        direct: [UNUSED; DIRECT_COUNT],
        indirect: [UNUSED; INDIRECT_COUNT],
        indirect2: UNUSED,
        indirect3: UNUSED,
        ..Default::default()
    }
}

/// Deterministic file content, distinct per `seed`
pub fn content(seed: u8, len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed.wrapping_mul(17)) | 1)
        .collect()
}

/// A permutation of `0..n` that spreads consecutive picks across the region.
fn scrambled(n: usize) -> Vec<i32> {
    let stride = (n / 2 + 1..n.max(2))
        .find(|&s| gcd(s, n) == 1)
        .unwrap_or(1);

    (0..n).map(|i| ((i * stride) % n.max(1)) as i32).rev().collect()
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}
