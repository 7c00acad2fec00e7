//! Published test vectors from BIP-32, BIP-39 and common BIP-44 tooling.

/// BIP-39: all-zero 128-bit entropy
pub const ABANDON_ABOUT: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// BIP-39: all-zero 256-bit entropy
pub const ABANDON_ART: &str = "abandon abandon abandon abandon abandon abandon abandon abandon \
     abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
     abandon abandon abandon abandon art";

/// BIP-39: entropy 0x7f repeated 16 times
pub const LEGAL_WINNER: &str =
    "legal winner thank year wave sausage worth useful legal winner thank yellow";

/// Seed of [`ABANDON_ABOUT`] with an empty passphrase
pub const ABANDON_ABOUT_SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
     9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e6";

/// Seed of [`ABANDON_ABOUT`] with passphrase "TREZOR"
pub const ABANDON_ABOUT_TREZOR_SEED: &str = "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
     1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04";

/// BIP-32 test vector 1 seed
pub const BIP32_TV1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

/// BIP-32 test vector 1, chain m
pub const BIP32_TV1_M_XPRV: &str = "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi";
/// BIP-32 test vector 1, chain m
pub const BIP32_TV1_M_XPUB: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";

/// BIP-32 test vector 1, chain m/0H
pub const BIP32_TV1_M_0H_XPRV: &str = "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7";
/// BIP-32 test vector 1, chain m/0H
pub const BIP32_TV1_M_0H_XPUB: &str = "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw";

/// BIP-32 test vector 1, chain m/0H/1
pub const BIP32_TV1_M_0H_1_XPRV: &str = "xprv9wTYmMFdV23N2TdNG573QoEsfRrWKQgWeibmLntzniatZvR9BmLnvSxqu53Kw1UmYPxLgboyZQaXwTCg8MSY3H2EU4pWcQDnRnrVA1xe8fs";
/// BIP-32 test vector 1, chain m/0H/1
pub const BIP32_TV1_M_0H_1_XPUB: &str = "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ";

/// BIP-32 test vector 1, chain m/0H/1/2H
pub const BIP32_TV1_M_0H_1_2H_XPRV: &str = "xprv9z4pot5VBttmtdRTWfWQmoH1taj2axGVzFqSb8C9xaxKymcFzXBDptWmT7FwuEzG3ryjH4ktypQSAewRiNMjANTtpgP4mLTj34bhnZX7UiM";
/// BIP-32 test vector 1, chain m/0H/1/2H
pub const BIP32_TV1_M_0H_1_2H_XPUB: &str = "xpub6D4BDPcP2GT577Vvch3R8wDkScZWzQzMMUm3PWbmWvVJrZwQY4VUNgqFJPMM3No2dFDFGTsxxpG5uJh7n7epu4trkrX7x7DogT5Uv6fcLW5";

/// BIP-32 test vector 1, chain m/0H/1/2H/2
pub const BIP32_TV1_M_0H_1_2H_2_XPRV: &str = "xprvA2JDeKCSNNZky6uBCviVfJSKyQ1mDYahRjijr5idH2WwLsEd4Hsb2Tyh8RfQMuPh7f7RtyzTtdrbdqqsunu5Mm3wDvUAKRHSC34sJ7in334";
/// BIP-32 test vector 1, chain m/0H/1/2H/2
pub const BIP32_TV1_M_0H_1_2H_2_XPUB: &str = "xpub6FHa3pjLCk84BayeJxFW2SP4XRrFd1JYnxeLeU8EqN3vDfZmbqBqaGJAyiLjTAwm6ZLRQUMv1ZACTj37sR62cfN7fe5JnJ7dh8zL4fiyLHV";

/// BIP-32 test vector 1, chain m/0H/1/2H/2/1000000000
pub const BIP32_TV1_M_0H_1_2H_2_1000000000_XPRV: &str = "xprvA41z7zogVVwxVSgdKUHDy1SKmdb533PjDz7J6N6mV6uS3ze1ai8FHa8kmHScGpWmj4WggLyQjgPie1rFSruoUihUZREPSL39UNdE3BBDu76";
/// BIP-32 test vector 1, chain m/0H/1/2H/2/1000000000
pub const BIP32_TV1_M_0H_1_2H_2_1000000000_XPUB: &str = "xpub6H1LXWLaKsWFhvm6RVpEL9P4KfRZSW7abD2ttkWP3SSQvnyA8FSVqNTEcYFgJS2UaFcxupHiYkro49S8yGasTvXEYBVPamhGW6cFJodrTHy";

/// BIP-32 test vector 2 seed (512 bits)
pub const BIP32_TV2_SEED: &str = "fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aeaba8a5a2\
     9f9c999693908d8a8784817e7b7875726f6c696663605d5a5754514e4b484542";

/// BIP-32 test vector 2, `(path, xprv, xpub)` from m down to depth 5
pub const BIP32_TV2_CHAIN: [(&str, &str, &str); 6] = [
    (
        "m",
        "xprv9s21ZrQH143K31xYSDQpPDxsXRTUcvj2iNHm5NUtrGiGG5e2DtALGdso3pGz6ssrdK4PFmM8NSpSBHNqPqm55Qn3LqFtT2emdEXVYsCzC2U",
        "xpub661MyMwAqRbcFW31YEwpkMuc5THy2PSt5bDMsktWQcFF8syAmRUapSCGu8ED9W6oDMSgv6Zz8idoc4a6mr8BDzTJY47LJhkJ8UB7WEGuduB",
    ),
    (
        "m/0",
        "xprv9vHkqa6EV4sPZHYqZznhT2NPtPCjKuDKGY38FBWLvgaDx45zo9WQRUT3dKYnjwih2yJD9mkrocEZXo1ex8G81dwSM1fwqWpWkeS3v86pgKt",
        "xpub69H7F5d8KSRgmmdJg2KhpAK8SR3DjMwAdkxj3ZuxV27CprR9LgpeyGmXUbC6wb7ERfvrnKZjXoUmmDznezpbZb7ap6r1D3tgFxHmwMkQTPH",
    ),
    (
        "m/0/2147483647H",
        "xprv9wSp6B7kry3Vj9m1zSnLvN3xH8RdsPP1Mh7fAaR7aRLcQMKTR2vidYEeEg2mUCTAwCd6vnxVrcjfy2kRgVsFawNzmjuHc2YmYRmagcEPdU9",
        "xpub6ASAVgeehLbnwdqV6UKMHVzgqAG8Gr6riv3Fxxpj8ksbH9ebxaEyBLZ85ySDhKiLDBrQSARLq1uNRts8RuJiHjaDMBU4Zn9h8LZNnBC5y4a",
    ),
    (
        "m/0/2147483647H/1",
        "xprv9zFnWC6h2cLgpmSA46vutJzBcfJ8yaJGg8cX1e5StJh45BBciYTRXSd25UEPVuesF9yog62tGAQtHjXajPPdbRCHuWS6T8XA2ECKADdw4Ef",
        "xpub6DF8uhdarytz3FWdA8TvFSvvAh8dP3283MY7p2V4SeE2wyWmG5mg5EwVvmdMVCQcoNJxGoWaU9DCWh89LojfZ537wTfunKau47EL2dhHKon",
    ),
    (
        "m/0/2147483647H/1/2147483646H",
        "xprvA1RpRA33e1JQ7ifknakTFpgNXPmW2YvmhqLQYMmrj4xJXXWYpDPS3xz7iAxn8L39njGVyuoseXzU6rcxFLJ8HFsTjSyQbLYnMpCqE2VbFWc",
        "xpub6ERApfZwUNrhLCkDtcHTcxd75RbzS1ed54G1LkBUHQVHQKqhMkhgbmJbZRkrgZw4koxb5JaHWkY4ALHY2grBGRjaDMzQLcgJvLJuZZvRcEL",
    ),
    (
        "m/0/2147483647H/1/2147483646H/2",
        "xprvA2nrNbFZABcdryreWet9Ea4LvTJcGsqrMzxHx98MMrotbir7yrKCEXw7nadnHM8Dq38EGfSh6dqA9QWTyefMLEcBYJUuekgW4BYPJcr9E7j",
        "xpub6FnCn6nSzZAw5Tw7cgR9bi15UV96gLZhjDstkXXxvCLsUXBGXPdSnLFbdpq8p9HmGsApME5hQTZ3emM2rnY5agb9rXpVGyy3bdW6EEgAtqt",
    ),
];

/// [`ABANDON_ABOUT`] account xpub at m/44'/0'/0'
pub const ABANDON_ABOUT_BTC_ACCOUNT_XPUB: &str = "xpub6BosfCnifzxcFwrSzQiqu2DBVTshkCXacvNsWGYJVVhhawA7d4R5WSWGFNbi8Aw6ZRc1brxMyWMzG3DSSSSoekkudhUd9yLb6qx39T9nMdj";

/// [`ABANDON_ABOUT`] BTC P2PKH address at m/44'/0'/0'/0/0
pub const ABANDON_ABOUT_BTC_ADDRESS_0: &str = "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA";

/// [`ABANDON_ABOUT`] DOGE P2PKH address at m/44'/3'/0'/0/0
pub const ABANDON_ABOUT_DOGE_ADDRESS_0: &str = "DBus3bamQjgJULBJtYXpEzDWQRwF5iwxgC";

/// [`ABANDON_ABOUT`] DOGE P2PKH address at m/44'/3'/0'/0/1
pub const ABANDON_ABOUT_DOGE_ADDRESS_1: &str = "DAcDAtJRztxBHyA6D6h8du1HguyTR43Mas";

/// [`ABANDON_ABOUT`] ETH address at m/44'/60'/0'/0/0, lowercase
pub const ABANDON_ABOUT_ETH_ADDRESS_0: &str = "0x9858effd232b4033e47d90003d41ec34ecaeda94";

/// [`ABANDON_ABOUT_ETH_ADDRESS_0`] with EIP-55 checksum casing
pub const ABANDON_ABOUT_ETH_ADDRESS_0_EIP55: &str = "0x9858EfFD232B4033E47d90003D41EC34EcaEda94";
